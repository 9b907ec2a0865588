use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = vmemo_api::Args::parse();

	vmemo_api::run(args).await
}
