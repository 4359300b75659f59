use anyhow::Result;

use sysmon::commands::{self, build_cli};

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    commands::monitor(&matches)
}
