// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use confbridge_cli::{Cli, Parser};
use confbridge_logging::CliLogLevel;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.logging.clone().init("confbridge-cli", CliLogLevel::Warn)?;
    cli.run()
}
