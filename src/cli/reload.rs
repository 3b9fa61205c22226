//! `reload` command: run the live-reload client against a headless page.

use std::sync::Arc;

use anyhow::{Context, Result};
use hostbridge::config::HostConfig;
use hostbridge::reload::{HeadlessPage, LinkElement, ReloadCallback, ReloadOptions, install_hmr};
use hostbridge::log;

use super::ReloadArgs;
use crate::core;

pub async fn run_reload(args: &ReloadArgs, config: &HostConfig) -> Result<()> {
    let mut options = ReloadOptions::from_config(&config.reload);
    if let Some(host) = &args.host {
        options.host = host.clone();
    }
    if let Some(port) = args.port {
        options.port = port;
    }

    let links = args.links.iter().map(LinkElement::stylesheet).collect();
    let page = Arc::new(HeadlessPage::with_links(args.secure, links));
    let on_reload: ReloadCallback = Box::new(|| log!("reload"; "reload requested"));

    let handle = install_hmr(options, page.clone(), Some(on_reload))
        .context("failed to start live reload client")?;
    log!("reload"; "listening on {}", handle.address());

    tokio::select! {
        result = handle.join() => {
            result?;
            log!("reload"; "connection closed");
        }
        _ = core::shutdown_signal() => log!("reload"; "interrupted"),
    }

    for link in page.links() {
        log!("reload"; "link {}", link.href.as_deref().unwrap_or("(none)"));
    }
    Ok(())
}
