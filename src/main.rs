//! serverless-config: print the effective deploy/logs configuration
//!
//! Resolves flags, project config file, `.env` file and caller context into
//! the configuration a deploy or logs client would use.

use anyhow::Result;

fn main() -> Result<()> {
    serverless_config::cli::run()
}
