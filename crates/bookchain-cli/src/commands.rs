use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;

use bookchain_crypto::book_id;
use bookchain_ledger::{ChainReader, InMemoryChain};
use bookchain_server::{BookchainServer, ServerConfig};
use bookchain_types::Book;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::BookId(args) => cmd_book_id(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;

    let chain = Arc::new(InMemoryChain::new().context("creating genesis block")?);
    let genesis = chain.tip()?;
    tracing::info!(
        bind = %config.bind_addr,
        genesis = %genesis.hash.short_hex(),
        max_body_bytes = config.max_body_bytes,
        "starting bookchain server"
    );
    println!("{} Genesis block created", "✓".green().bold());
    println!("  Hash: {}", genesis.hash.to_hex().yellow());
    println!("  Listening on {}", config.bind_addr.to_string().bold());

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(BookchainServer::new(config, chain).serve())?;
    Ok(())
}

/// Config file (or defaults) with command-line overrides applied.
fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading server config");
            ServerConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?
        }
        None => {
            tracing::debug!("no config file given; using defaults");
            ServerConfig::default()
        }
    };
    if let Some(bind) = args.bind {
        tracing::debug!(%bind, "bind address overridden on the command line");
        config.bind_addr = bind;
    }
    Ok(config)
}

fn cmd_book_id(args: BookIdArgs) -> anyhow::Result<()> {
    let book = Book {
        isbn: args.isbn,
        publish_date: args.publish_date,
        ..Book::default()
    };
    println!("{}", book_id(&book).yellow());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn defaults_without_config_file() {
        let args = ServeArgs {
            config: None,
            bind: None,
        };
        assert_eq!(resolve_config(&args).unwrap(), ServerConfig::default());
    }

    #[test]
    fn bind_flag_overrides_config() {
        let args = ServeArgs {
            config: None,
            bind: Some("0.0.0.0:8080".parse().unwrap()),
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.max_body_bytes, ServerConfig::default().max_body_bytes);
    }

    #[test]
    fn missing_config_file_names_the_path() {
        let args = ServeArgs {
            config: Some(PathBuf::from("/nonexistent/bookchain.toml")),
            bind: None,
        };
        let err = resolve_config(&args).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/bookchain.toml"));
    }
}
