//! List posts available in the CMS

use anyhow::Result;

use crate::Blog;

/// Print every post summary, following all listing pages
pub async fn run(blog: &Blog) -> Result<()> {
    let loader = blog.loader()?;
    let posts = loader.load_all().await?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} by {} [{}]",
            post.first_publication_date.as_deref().unwrap_or("unpublished"),
            post.title,
            post.author,
            post.uid
        );
    }

    Ok(())
}
