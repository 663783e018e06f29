//! Blog CLI commands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::client::blogs::BlogForm;

/// Blog commands.
#[derive(Debug, Parser)]
pub struct BlogsCommand {
    #[command(subcommand)]
    pub action: BlogsAction,
}

/// Text and images shared by create and update.
#[derive(Debug, Args)]
pub struct BlogFields {
    /// Blog title.
    #[arg(long)]
    pub title: String,
    /// Blog content.
    #[arg(long)]
    pub content: String,
    /// Cover image (jpeg, jpg, png or gif).
    #[arg(long)]
    pub cover: Option<PathBuf>,
    /// Content image; repeat for more (up to 10).
    #[arg(long)]
    pub image: Vec<PathBuf>,
}

impl From<BlogFields> for BlogForm {
    fn from(fields: BlogFields) -> Self {
        Self {
            title: fields.title,
            content: fields.content,
            cover: fields.cover,
            images: fields.image,
        }
    }
}

/// Available blog actions.
#[derive(Debug, Subcommand)]
pub enum BlogsAction {
    /// List blogs, newest first.
    List {
        /// Page number (from 1).
        #[arg(long)]
        page: Option<u64>,
        /// Blogs per page.
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Get blog by ID.
    Get {
        /// Blog ID.
        id: String,
    },
    /// Create a new blog.
    Create(BlogFields),
    /// Update a blog you wrote.
    Update {
        /// Blog ID.
        id: String,
        #[command(flatten)]
        fields: BlogFields,
    },
    /// Delete a blog you wrote.
    Delete {
        /// Blog ID.
        id: String,
    },
}
