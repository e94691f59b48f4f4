//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Upload and download files on Yandex Disk.
#[derive(Parser, Debug)]
#[command(name = "disk-cli")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// The operation to run.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a local file, replacing any existing file
    Upload(UploadArgs),
    /// Download a file, or a folder as a zip archive
    Download(DownloadArgs),
}

/// Options shared by every command.
#[derive(ClapArgs, Debug)]
pub struct TokenArgs {
    /// OAuth access token of the application
    #[arg(short = 't', long = "access-token")]
    pub access_token: String,
}

/// Arguments of `upload`.
#[derive(ClapArgs, Debug)]
pub struct UploadArgs {
    /// Local file
    pub source: PathBuf,

    /// Target path on the disk
    pub target: String,

    #[command(flatten)]
    pub token: TokenArgs,
}

/// Arguments of `download`.
#[derive(ClapArgs, Debug)]
pub struct DownloadArgs {
    /// File or folder on the disk
    pub source: String,

    /// Local folder
    pub target: PathBuf,

    /// Extract a downloaded folder instead of saving the archive
    #[arg(short, long)]
    pub unzip: bool,

    #[command(flatten)]
    pub token: TokenArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_upload_parses_positionals_and_token() {
        let args =
            Args::try_parse_from(["disk-cli", "upload", "a.txt", "/docs/a.txt", "-t", "tok"])
                .unwrap();
        let Command::Upload(upload) = args.command else {
            panic!("expected upload");
        };
        assert_eq!(upload.source, PathBuf::from("a.txt"));
        assert_eq!(upload.target, "/docs/a.txt");
        assert_eq!(upload.token.access_token, "tok");
    }

    #[test]
    fn test_cli_download_unzip_flag() {
        let args = Args::try_parse_from([
            "disk-cli",
            "download",
            "/photos",
            "out",
            "-u",
            "--access-token",
            "tok",
        ])
        .unwrap();
        let Command::Download(download) = args.command else {
            panic!("expected download");
        };
        assert!(download.unzip);
        assert_eq!(download.source, "/photos");
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args =
            Args::try_parse_from(["disk-cli", "-vv", "upload", "a", "/a", "-t", "tok"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_missing_subcommand_returns_error() {
        let result = Args::try_parse_from(["disk-cli"]);
        assert!(result.is_err());
    }
}
