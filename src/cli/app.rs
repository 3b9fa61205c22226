//! Application commands: `dir`, `storage`, `package`, `pick`, `open`, `title`.

use anyhow::{Context, Result, anyhow, bail};
use hostbridge::host::{FileFilters, Host};
use hostbridge::{NativeHost, log};

use super::{PickArgs, StorageAction};

pub fn print_dir(host: &NativeHost, kind: &str, parts: &[String]) -> Result<()> {
    let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
    let path = host.get_global_path(kind, &parts)?;
    println!("{}", path.display());
    Ok(())
}

pub fn storage(host: &NativeHost, action: &StorageAction) -> Result<()> {
    match action {
        StorageAction::Get { key } => match host.read_local_storage(key) {
            Some(value) => println!("{value}"),
            None => bail!("`{key}` is not set"),
        },
        StorageAction::Set { key, value } => host.write_local_storage(key, value)?,
        StorageAction::Remove { key } => {
            if !host.context().storage()?.remove(key)? {
                log!("storage"; "`{}` was not set", key);
            }
        }
        StorageAction::List => {
            for key in host.context().storage()?.keys() {
                println!("{key}");
            }
        }
    }
    Ok(())
}

pub fn print_package(host: &NativeHost, pretty: bool) -> Result<()> {
    let manifest = host.get_package()?;
    let json = if pretty {
        serde_json::to_string_pretty(&manifest)?
    } else {
        serde_json::to_string(&manifest)?
    };
    println!("{json}");
    Ok(())
}

/// Parse `label=ext[,ext...]` filters, keeping their order.
fn parse_filters(specs: &[String]) -> Result<FileFilters> {
    specs
        .iter()
        .map(|spec| {
            let (label, exts) = spec
                .split_once('=')
                .ok_or_else(|| anyhow!("filter `{spec}` must look like label=ext,ext"))?;
            let exts: Vec<String> = exts
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .collect();
            if exts.is_empty() {
                bail!("filter `{label}` has no extensions");
            }
            Ok((label.trim().to_string(), exts))
        })
        .collect()
}

pub async fn pick(host: &NativeHost, args: &PickArgs) -> Result<()> {
    let filters = parse_filters(&args.filters)?;
    let host = host.clone();
    let args = args.clone();

    // Dialogs wait on the user without a timeout
    tokio::task::spawn_blocking(move || pick_blocking(&host, &args, &filters))
        .await
        .context("dialog task failed")?
}

fn pick_blocking(host: &NativeHost, args: &PickArgs, filters: &FileFilters) -> Result<()> {
    let picked = if args.save {
        let default_name = args.default_name.as_deref().unwrap_or_default();
        host.save_file(default_name, filters, |path| println!("{path}"))?
    } else {
        host.open_file(
            filters,
            |paths| {
                for path in paths {
                    println!("{path}");
                }
            },
            args.multiple,
        )?
    };

    if !picked {
        log!("dialog"; "cancelled");
    }
    Ok(())
}

pub fn open_url(host: &NativeHost, url: &str) -> Result<()> {
    // Failures are reported by the privileged side
    host.open_external(url);
    Ok(())
}

pub fn set_title(host: &NativeHost, title: &str) -> Result<()> {
    host.set_window_title(title);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_filters() {
        let filters = parse_filters(&specs(&["images=png, jpg", "text=txt"])).unwrap();
        let names: Vec<_> = filters.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["images", "text"]);
        assert_eq!(filters.iter().next().unwrap().extensions, ["png", "jpg"]);
    }

    #[test]
    fn test_parse_filters_rejects_bad_specs() {
        assert!(parse_filters(&specs(&["images"])).is_err());
        assert!(parse_filters(&specs(&["images=,"])).is_err());
        assert!(parse_filters(&[]).unwrap().is_empty());
    }
}
