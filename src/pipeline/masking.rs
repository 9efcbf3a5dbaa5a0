//! Field-kind display masking
//!
//! A [`MaskRegistry`] maps a field-kind label (`name`, `email`, `phone`, ...)
//! to a masking function. Kinds without a registered function are returned
//! unchanged. The kind of a column is its lower-cased name unless
//! [`FieldKinds`] carries an alias for it.
//!
//! Masks are display-only and not idempotent: masking `J*** D**` again as a
//! name gives `J*** D**` by accident, but an already masked email or phone is
//! not a contracted input.

use std::collections::HashMap;
use std::sync::Arc;

pub const KIND_NAME: &str = "name";
pub const KIND_EMAIL: &str = "email";
pub const KIND_PHONE: &str = "phone";

const MASK_CHAR: char = '*';
const PHONE_MASK: &str = "******";
const PHONE_VISIBLE: usize = 4;

/// Shared masking function
pub type MaskFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Field-kind label to masking function
#[derive(Clone)]
pub struct MaskRegistry {
    maskers: HashMap<String, MaskFn>,
}

impl MaskRegistry {
    /// Registry with no masking functions; every kind is identity
    pub fn empty() -> Self {
        Self {
            maskers: HashMap::new(),
        }
    }

    /// Registry with the built-in `name`, `email` and `phone` masks
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(KIND_NAME, mask_name);
        registry.register(KIND_EMAIL, mask_email);
        registry.register(KIND_PHONE, mask_phone);
        registry
    }

    /// Register or replace the mask for a kind (labels are case-insensitive)
    pub fn register<F>(&mut self, kind: &str, mask: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.maskers.insert(kind.to_lowercase(), Arc::new(mask));
    }

    pub fn is_registered(&self, kind: &str) -> bool {
        self.maskers.contains_key(&kind.to_lowercase())
    }

    /// Mask a value as the given kind, identity for unknown kinds
    pub fn mask(&self, kind: &str, value: &str) -> String {
        match self.maskers.get(&kind.to_lowercase()) {
            Some(mask) => mask(value),
            None => value.to_string(),
        }
    }

    /// Registered kind labels, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.maskers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for MaskRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for MaskRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Column name to field-kind resolution
#[derive(Debug, Clone, Default)]
pub struct FieldKinds {
    aliases: HashMap<String, String>,
}

impl FieldKinds {
    /// Build from `column -> kind` aliases; both sides are case-insensitive
    pub fn from_aliases<I, K, V>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self {
            aliases: aliases
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v.as_ref().to_lowercase()))
                .collect(),
        }
    }

    /// Field kind of a column
    pub fn kind_for(&self, column: &str) -> String {
        let column = column.to_lowercase();
        self.aliases.get(&column).cloned().unwrap_or(column)
    }
}

/// Keep the first character of each space-separated piece
///
/// ```
/// use veil::pipeline::masking::mask_name;
/// assert_eq!(mask_name("John Doe"), "J*** D**");
/// ```
pub fn mask_name(value: &str) -> String {
    value
        .split(' ')
        .map(|piece| {
            let mut chars = piece.chars();
            match chars.next() {
                Some(first) => std::iter::once(first)
                    .chain(chars.map(|_| MASK_CHAR))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Mask the local part of an address, keeping its first and last character
///
/// Values without exactly one `@` are returned unchanged.
///
/// ```
/// use veil::pipeline::masking::mask_email;
/// assert_eq!(mask_email("john@example.com"), "j**n@example.com");
/// ```
pub fn mask_email(value: &str) -> String {
    let Some((local, domain)) = value.split_once('@') else {
        return value.to_string();
    };
    if domain.contains('@') {
        return value.to_string();
    }

    let chars: Vec<char> = local.chars().collect();
    if chars.len() <= 2 {
        return value.to_string();
    }

    let mut masked = String::with_capacity(value.len());
    masked.push(chars[0]);
    masked.extend(std::iter::repeat(MASK_CHAR).take(chars.len() - 2));
    masked.push(chars[chars.len() - 1]);
    masked.push('@');
    masked.push_str(domain);
    masked
}

/// Fixed-width phone mask: six `*` followed by the last four characters
///
/// ```
/// use veil::pipeline::masking::mask_phone;
/// assert_eq!(mask_phone("9876543210"), "******3210");
/// assert_eq!(mask_phone("+1 (555) 010-9999"), "******9999");
/// ```
pub fn mask_phone(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(PHONE_VISIBLE)..]
        .iter()
        .collect();
    format!("{PHONE_MASK}{tail}")
}
