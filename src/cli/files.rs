//! File commands: `gzip`, `gunzip`, `stat`, `ls`, `path`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hostbridge::host::compress::gzip;
use hostbridge::host::path::PathParts;
use hostbridge::host::{Host, PathPart};
use hostbridge::{NativeHost, log};

use super::IoArgs;

/// `a.txt` → `a.txt.gz`
fn gzip_target(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".gz");
    PathBuf::from(name)
}

/// `a.txt.gz` → `a.txt`, anything else → `<input>.out`
fn gunzip_target(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("gz") => input.with_extension(""),
        _ => {
            let mut name = OsString::from(input.as_os_str());
            name.push(".out");
            PathBuf::from(name)
        }
    }
}

pub async fn gzip_file(host: &NativeHost, io: &IoArgs, level: Option<u32>) -> Result<()> {
    let output = io.output.clone().unwrap_or_else(|| gzip_target(&io.input));
    let data = host.read_binary(&io.input).await?;
    let size = data.len();

    let packed = match level {
        // Explicit level overrides [compress] level
        Some(level) => tokio::task::spawn_blocking(move || gzip(&data, level))
            .await
            .context("compression task failed")??,
        None => host.compress(data).await?,
    };

    host.write_binary(&output, &packed).await?;
    log!("gzip"; "{} -> {} ({} -> {} bytes)", io.input.display(), output.display(), size, packed.len());
    Ok(())
}

pub async fn gunzip_file(host: &NativeHost, io: &IoArgs) -> Result<()> {
    let output = io.output.clone().unwrap_or_else(|| gunzip_target(&io.input));
    let data = host.read_binary(&io.input).await?;
    let plain = host
        .decompress(data)
        .await
        .with_context(|| format!("`{}` is not a gzip file", io.input.display()))?;

    host.write_binary(&output, &plain).await?;
    log!("gunzip"; "{} -> {} ({} bytes)", io.input.display(), output.display(), plain.len());
    Ok(())
}

pub async fn stat_path(host: &NativeHost, path: &Path) -> Result<()> {
    match host.stat(path).await? {
        Some(stat) => {
            let kind = if stat.is_dir { "directory" } else { "file" };
            println!("{}: {kind}, accessed {} ms", path.display(), stat.atime_ms());
        }
        None => println!("{}: does not exist", path.display()),
    }
    Ok(())
}

pub async fn list_dir(host: &NativeHost, path: &Path) -> Result<()> {
    for name in host.read_dir(path).await? {
        println!("{name}");
    }
    Ok(())
}

pub fn print_path_parts(host: &NativeHost, path: &str, part: Option<&str>) -> Result<()> {
    if let Some(kind) = part {
        kind.parse::<PathPart>()
            .map_err(|_| anyhow::anyhow!("unknown part `{kind}` (dirname, basename, filename, extname)"))?;
        println!("{}", host.get_path_part(path, kind));
        return Ok(());
    }

    let parts = PathParts::parse(path);
    for kind in PathPart::ALL {
        println!("{:<9} {}", kind.as_str(), parts.get(kind));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gzip_target() {
        assert_eq!(gzip_target(Path::new("a.txt")), PathBuf::from("a.txt.gz"));
        assert_eq!(gzip_target(Path::new("dir/a")), PathBuf::from("dir/a.gz"));
    }

    #[test]
    fn test_gunzip_target() {
        assert_eq!(gunzip_target(Path::new("a.txt.gz")), PathBuf::from("a.txt"));
        assert_eq!(gunzip_target(Path::new("a.GZ")), PathBuf::from("a"));
        assert_eq!(gunzip_target(Path::new("a.bin")), PathBuf::from("a.bin.out"));
    }
}
