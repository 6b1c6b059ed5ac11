use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// projsync - keep project manifests in sync with the files they list
#[derive(Parser, Debug)]
#[command(name = "projsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project manifest (defaults to the only manifest in the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List folders and files one level below a virtual path
    List {
        /// Virtual path inside the project (root if omitted)
        path: Option<PathBuf>,
    },

    /// List every folder of the project
    Folders,

    /// Show project and assembly references
    Refs,

    /// Show package references
    Packages,

    /// Create a file and add it to the manifest
    NewFile {
        /// Folder to create the file in
        folder: PathBuf,

        /// File name
        name: String,

        /// Initial content
        #[arg(long)]
        content: Option<String>,
    },

    /// Create a folder
    NewFolder {
        /// Folder to create
        path: PathBuf,
    },

    /// Rename a file or folder
    Rename {
        /// File or folder to rename
        path: PathBuf,

        /// New name
        name: String,

        /// Rename a folder
        #[arg(long)]
        folder: bool,
    },

    /// Move a file or folder into another folder
    Mv {
        /// File or folder to move
        path: PathBuf,

        /// Destination folder
        dest: PathBuf,

        /// Move a folder
        #[arg(long)]
        folder: bool,
    },

    /// Delete a file or folder
    Rm {
        /// File or folder to delete
        path: PathBuf,

        /// Delete a folder
        #[arg(long)]
        folder: bool,
    },
}
