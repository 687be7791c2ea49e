use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = ethdir_api::Args::parse();

	ethdir_api::run(args).await
}
