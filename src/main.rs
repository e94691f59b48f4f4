//! CLI entry point for the disk client.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use disk_api::protocol::{ResourceRequest, ResourceType};
use disk_api::{DiskApi, DiskConfig, OAuthToken};
use tokio_util::sync::CancellationToken;
use tracing::debug;

mod cli;

use cli::{Args, Command, DownloadArgs, TokenArgs, UploadArgs};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Priority: RUST_LOG env var > verbose flag > default (warn)
    let default_level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    if let Err(e) = run(args.command).await {
        eprintln!("{e:#}");
        std::process::exit(-1);
    }
}

async fn run(command: Command) -> Result<()> {
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    match command {
        Command::Upload(args) => upload(args, &cancel).await,
        Command::Download(args) => download(args, &cancel).await,
    }
}

fn connect(token: TokenArgs) -> Result<DiskApi> {
    let config = DiskConfig::builder()
        .token(OAuthToken::new(token.access_token)?)
        .build()?;
    Ok(DiskApi::new(&config)?)
}

async fn upload(args: UploadArgs, cancel: &CancellationToken) -> Result<()> {
    let api = connect(args.token)?;

    println!("Receiving upload link...");
    let link = api
        .files()
        .get_upload_link(&args.target, true, cancel)
        .await?;

    let file = tokio::fs::File::open(&args.source)
        .await
        .with_context(|| format!("cannot open '{}'", args.source.display()))?;
    println!("Uploading '{}'...", args.source.display());
    api.files()
        .upload(
            &link,
            disk_api::clients::RequestBody::stream(tokio_util::io::ReaderStream::new(file)),
            cancel,
        )
        .await?;

    println!(
        "File '{}' was uploaded to '{}'.",
        args.source.display(),
        args.target
    );
    Ok(())
}

async fn download(args: DownloadArgs, cancel: &CancellationToken) -> Result<()> {
    let api = connect(args.token)?;

    println!("Receiving resource info...");
    let resource = api
        .meta_info()
        .get_info(&ResourceRequest::new(args.source.as_str()), cancel)
        .await?;

    println!("Receiving download link...");
    let link = api.files().get_download_link(&args.source, cancel).await?;

    println!("Downloading '{}'...", args.source);
    let stream = api.files().download(&link, cancel).await?;

    match resource.resource_type {
        ResourceType::Dir if args.unzip => {
            let archive = disk_api::clients::collect_body(stream).await?;
            extract_archive(archive.to_vec(), args.target.clone()).await?;
            println!(
                "Directory '{}' was extracted into '{}'.",
                args.source,
                args.target.display()
            );
        }
        ResourceType::Dir => {
            let file_name = args.target.join(format!("{}.zip", resource.name));
            save_stream(stream, &file_name).await?;
            println!(
                "Directory '{}' was saved as '{}'.",
                args.source,
                file_name.display()
            );
        }
        ResourceType::File => {
            let file_name = args.target.join(&resource.name);
            save_stream(stream, &file_name).await?;
            println!(
                "File '{}' was saved as '{}'.",
                args.source,
                file_name.display()
            );
        }
    }
    Ok(())
}

async fn save_stream(stream: disk_api::clients::ByteStream, file_name: &Path) -> Result<()> {
    let file = tokio::fs::File::create(file_name)
        .await
        .with_context(|| format!("cannot create '{}'", file_name.display()))?;
    if let Err(e) = write_stream(stream, file).await {
        let _ = tokio::fs::remove_file(file_name).await;
        return Err(e.context(format!("download into '{}' failed", file_name.display())));
    }
    Ok(())
}

async fn write_stream(mut stream: disk_api::clients::ByteStream, mut file: tokio::fs::File) -> Result<()> {
    use futures_util::StreamExt;
    use tokio::io::AsyncWriteExt;

    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;
    Ok(())
}

async fn extract_archive(archive: Vec<u8>, target: PathBuf) -> Result<()> {
    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut archive = zip::ZipArchive::new(Cursor::new(archive))
            .context("downloaded folder is not a zip archive")?;
        archive
            .extract(&target)
            .with_context(|| format!("cannot extract into '{}'", target.display()))?;
        Ok(())
    })
    .await?
}
