//! projsync CLI - keep project manifests in sync with the files they list
//!
//! Usage: projsync [--project <MANIFEST>] <COMMAND>
//!
//! Commands:
//!   list        List folders and files below a virtual path
//!   folders     List every folder of the project
//!   refs        Show project and assembly references
//!   packages    Show package references
//!   new-file    Create a file and add it to the manifest
//!   new-folder  Create a folder
//!   rename      Rename a file or folder
//!   mv          Move a file or folder
//!   rm          Delete a file or folder

mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use projsync::{open_project, Config, LocalFs, Project, ProjectListing};

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let log_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    if let Err(err) = run(cli) {
        log::error!("{:#}", err);
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let manifest = match &cli.project {
        Some(path) => absolute(&cwd, path),
        None => find_manifest(&cwd)?,
    };
    let manifest_dir = manifest.parent().unwrap_or(&cwd).to_path_buf();
    let config = load_config(&manifest_dir);

    let mut project = open_project(&manifest, LocalFs::new(), Arc::new(config))
        .with_context(|| format!("failed to open {}", manifest.display()))?;
    let json = cli.json;

    match cli.command {
        Commands::List { path } => {
            let listing = project.files_and_folders(path.as_deref())?;
            if json {
                emit_json(&listing)
            } else {
                print_listing(&listing);
                Ok(())
            }
        }
        Commands::Folders => {
            let folders = project.folder_list()?;
            if json {
                return emit_json(&folders);
            }
            for folder in folders {
                println!("{}", folder);
            }
            Ok(())
        }
        Commands::Refs => cmd_refs(project.as_mut(), json),
        Commands::Packages => cmd_packages(project.as_mut(), json),
        Commands::NewFile {
            folder,
            name,
            content,
        } => {
            let folder = absolute(&cwd, &folder);
            let created = project.create_file(&folder, &name, content.as_deref())?;
            report_path("created", &created, json)
        }
        Commands::NewFolder { path } => {
            let created = project.create_folder(&absolute(&cwd, &path))?;
            report_path("created", &created, json)
        }
        Commands::Rename { path, name, folder } => {
            let path = absolute(&cwd, &path);
            let renamed = if folder {
                project.rename_folder(&path, &name)?
            } else {
                project.rename_file(&path, &name)?
            };
            report_path("renamed", &renamed, json)
        }
        Commands::Mv { path, dest, folder } => {
            let (path, dest) = (absolute(&cwd, &path), absolute(&cwd, &dest));
            let stat = project.stat_file(&path, &dest);
            if stat.exists {
                bail!("{} already exists", stat.full_path.display());
            }
            let moved = if folder {
                project.move_folder(&path, &dest)?
            } else {
                project.move_file(&path, &dest)?
            };
            report_path("moved", &moved, json)
        }
        Commands::Rm { path, folder } => {
            let path = absolute(&cwd, &path);
            if folder {
                project.delete_folder(&path)?;
            } else {
                project.delete_file(&path)?;
            }
            report_path("deleted", &path, json)
        }
    }
}

fn cmd_refs(project: &mut dyn Project, json: bool) -> Result<()> {
    let references = project.project_references()?;
    if json {
        return emit_json(&references);
    }
    for reference in references {
        println!("{}  ({})", reference.name(), reference.path());
    }
    Ok(())
}

fn cmd_packages(project: &mut dyn Project, json: bool) -> Result<()> {
    let packages = project.package_references()?;
    if json {
        return emit_json(&packages);
    }
    for package in packages {
        match package.version() {
            Some(version) => println!("{} {}", package.name(), version),
            None => println!("{}", package.name()),
        }
    }
    Ok(())
}

fn print_listing(listing: &ProjectListing) {
    for folder in &listing.folders {
        println!("{}/", folder.name);
    }
    for file in &listing.files {
        println!("{}", file.name);
        for dependent in &file.dependents {
            println!("  {}", dependent.name);
        }
    }
}

fn report_path(action: &str, path: &Path, json: bool) -> Result<()> {
    if json {
        return emit_json(&serde_json::json!({
            "action": action,
            "path": path,
        }));
    }
    println!("{} {}", action, path.display());
    Ok(())
}

fn emit_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// The single manifest in `dir`.
fn find_manifest(dir: &Path) -> Result<PathBuf> {
    let mut manifests = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_manifest = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.ends_with("proj") || ext == "projitems");
        if is_manifest && path.is_file() {
            manifests.push(path);
        }
    }

    match manifests.len() {
        0 => bail!("no project manifest in {}; pass --project", dir.display()),
        1 => Ok(manifests.remove(0)),
        _ => bail!(
            "several project manifests in {}; pass --project",
            dir.display()
        ),
    }
}

fn load_config(manifest_dir: &Path) -> Config {
    let (config, warnings) = Config::load_or_default_with_warnings(Some(manifest_dir));
    for warning in warnings {
        let line = warning
            .line
            .map(|line| format!(":{}", line))
            .unwrap_or_default();
        match warning.suggestion {
            Some(suggestion) => log::warn!(
                "{}{}: unknown key '{}' (did you mean '{}'?)",
                warning.file.display(),
                line,
                warning.key,
                suggestion
            ),
            None => log::warn!(
                "{}{}: unknown key '{}'",
                warning.file.display(),
                line,
                warning.key
            ),
        }
    }
    config
}
