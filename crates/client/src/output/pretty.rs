//! Pretty output formatting.

use blogstack_core::{
    auth::{Claims, PublicUser},
    blog::{BlogPage, BlogView},
};
use chrono::{DateTime, Utc};

use crate::client::health::Readiness;

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

/// Format a blog for display.
pub fn format_blog(blog: &BlogView) -> String {
    let author = blog
        .author
        .as_ref()
        .map(|a| format!("{} <{}>", a.name, a.email))
        .unwrap_or_else(|| "unknown".to_string());

    let mut output = format!(
        "{}\n  ID: {}\n  Author: {}\n  Created: {}",
        blog.title,
        blog.id,
        author,
        format_date(&blog.created_at)
    );
    if blog.updated_at != blog.created_at {
        output.push_str(&format!("\n  Updated: {}", format_date(&blog.updated_at)));
    }
    if !blog.cover_image.is_empty() {
        output.push_str(&format!("\n  Cover: {}", blog.cover_image));
    }
    for image in &blog.content_images {
        output.push_str(&format!("\n  Image: {}", image));
    }
    output.push_str(&format!("\n\n{}", blog.content));
    output
}

/// Format a page of blogs as a listing.
pub fn format_blog_page(page: &BlogPage) -> String {
    if page.blogs.is_empty() {
        return "No blogs found.".to_string();
    }
    let mut output = format!(
        "BLOGS (page {} of {}, {} total)\n",
        page.current_page, page.total_pages, page.total_blogs
    );
    output.push_str(&"-".repeat(40));
    for blog in &page.blogs {
        let author = blog.author.as_ref().map(|a| a.name.as_str()).unwrap_or("unknown");
        output.push_str(&format!(
            "\n{}\n  ID: {}\n  By {} on {}\n",
            blog.title,
            blog.id,
            author,
            format_date(&blog.created_at)
        ));
    }
    output
}

/// Format a user for display.
pub fn format_user(user: &PublicUser) -> String {
    format!(
        "{}\n  ID: {}\n  Email: {}\n  Joined: {}",
        user.name,
        user.id,
        user.email,
        format_date(&user.date)
    )
}

/// Format decoded token claims.
pub fn format_claims(claims: &Claims, expired: bool) -> String {
    let expires = DateTime::<Utc>::from_timestamp(claims.exp, 0)
        .map(|d| format_date(&d))
        .unwrap_or_else(|| claims.exp.to_string());
    let state = if expired { "expired" } else { "expires" };

    format!(
        "Signed in as {}\n  ID: {}\n  Token {}: {}",
        claims.user.name, claims.user.id, state, expires
    )
}

/// Format a readiness report.
pub fn format_readiness(readiness: &Readiness) -> String {
    format!(
        "Ready: {}\n  Storage: {}\n  Uploads: {}",
        if readiness.healthy { "yes" } else { "no" },
        readiness.storage,
        readiness.uploads
    )
}
