use crate::search::ImageItem;

/// Render a sequence of images as gallery list items. Pure: same items in,
/// same markup out.
pub fn gallery_markup(items: &[ImageItem]) -> String {
    items.iter().map(item_markup).collect()
}

fn item_markup(item: &ImageItem) -> String {
    let tags = escape_html(&item.tags);
    format!(
        r#"<li class="gallery-item">
  <a class="gallery-link" href="{large}">
    <img class="gallery-image" src="{thumb}" alt="{tags}" loading="lazy" />
  </a>
  <ul class="gallery-meta">
    <li><span>Likes</span>{likes}</li>
    <li><span>Views</span>{views}</li>
    <li><span>Comments</span>{comments}</li>
    <li><span>Downloads</span>{downloads}</li>
  </ul>
</li>
"#,
        large = escape_html(&item.large_image_url),
        thumb = escape_html(&item.webformat_url),
        tags = tags,
        likes = item.likes,
        views = item.views,
        comments = item.comments,
        downloads = item.downloads,
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(tags: &str) -> ImageItem {
        ImageItem {
            webformat_url: "https://cdn.example.com/small.jpg".into(),
            large_image_url: "https://cdn.example.com/large.jpg".into(),
            tags: tags.into(),
            likes: 12,
            views: 345,
            comments: 6,
            downloads: 78,
        }
    }

    #[test]
    fn markup_links_thumbnail_to_full_size_image() {
        let markup = gallery_markup(&[item("cat, pet")]);
        assert!(markup.contains(r#"href="https://cdn.example.com/large.jpg""#));
        assert!(markup.contains(r#"src="https://cdn.example.com/small.jpg""#));
        assert!(markup.contains(r#"alt="cat, pet""#));
        assert!(markup.contains("<span>Likes</span>12"));
        assert!(markup.contains("<span>Downloads</span>78"));
    }

    #[test]
    fn markup_is_idempotent_for_the_same_items() {
        let items = vec![item("cat"), item("dog")];
        assert_eq!(gallery_markup(&items), gallery_markup(&items));
    }

    #[test]
    fn markup_escapes_interpolated_text() {
        let markup = gallery_markup(&[item(r#"<script>"x"&'y'</script>"#)]);
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&lt;script&gt;&quot;x&quot;&amp;&#39;y&#39;&lt;/script&gt;"));
    }

    #[test]
    fn no_items_renders_nothing() {
        assert_eq!(gallery_markup(&[]), "");
    }

    #[test]
    fn one_list_item_per_image() {
        let markup = gallery_markup(&[item("a"), item("b"), item("c")]);
        assert_eq!(markup.matches(r#"<li class="gallery-item">"#).count(), 3);
    }
}
