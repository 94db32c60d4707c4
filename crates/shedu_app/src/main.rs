mod cli;
mod platform;

fn main() -> anyhow::Result<()> {
    cli::run_from_args()
}
