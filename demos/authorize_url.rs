//! Walks through composing an authorization URL with fresh PKCE material and
//! developer preset keys translated into their OAuth scopes.

// crates.io
use color_eyre::Result;
use url::Url;
// self
use humanity_sdk::{
	client::{AuthorizeOptions, HumanityClient},
	pkce,
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let client = HumanityClient::builder(
		"demo-client",
		Url::parse("https://app.example.com/humanity/callback")?,
	)
	.build()?;
	let state = pkce::generate_state(43)?;
	let session = client.authorize_url(
		AuthorizeOptions::new(["openid", "isHuman", "is18Plus"])
			.state(state.as_str())
			.extra_param("maxAge", "3600"),
	)?;

	println!("Send your user to {}.", &session.authorize_url);
	println!(
		"Stash the verifier for the redirect handler; its S256 challenge is {}.",
		pkce::derive_code_challenge(&session.code_verifier)?
	);
	println!(
		"On the callback, check the echoed state with pkce::verify_state(\"{state}\", received) \
		 before exchanging the code with HumanityClient::exchange_code."
	);

	Ok(())
}
