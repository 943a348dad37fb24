use anyhow::Result;

fn main() -> Result<()> {
    rsrc_cli::main_entry()
}
