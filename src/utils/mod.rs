pub mod url_validator;

/// Slug 最大长度
pub const MAX_SLUG_LENGTH: usize = 128;

/// Paths the redirect router answers itself; never valid as slugs.
pub const RESERVED_SLUGS: &[&str] = &["favicon.ico", "robots.txt"];

/// Check slug syntax: 1..=128 chars of `[A-Za-z0-9_.-]`.
///
/// Slugs end up as a single path segment both on the redirect router and on
/// the remote store (`/_/{slug}`), so `/`, `?`, `#` and whitespace are out.
#[inline]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LENGTH
        && slug
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
}

/// Check whether `slug` collides with a built-in or configured reserved path.
///
/// Comparison is case-sensitive, like slugs themselves.
pub fn is_reserved_slug(slug: &str, extra: &[String]) -> bool {
    RESERVED_SLUGS.contains(&slug) || extra.iter().any(|r| r == slug)
}

/// Slug rules shared by the command validator and the redirect router.
#[derive(Debug, Clone, Default)]
pub struct SlugPolicy {
    reserved: Vec<String>,
}

impl SlugPolicy {
    pub fn new(reserved: Vec<String>) -> Self {
        Self { reserved }
    }

    #[inline]
    pub fn is_valid(&self, slug: &str) -> bool {
        is_valid_slug(slug)
    }

    #[inline]
    pub fn is_reserved(&self, slug: &str) -> bool {
        is_reserved_slug(slug, &self.reserved)
    }
}
