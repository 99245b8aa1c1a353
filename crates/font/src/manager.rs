use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::{FailoverFont, FontError, FontRef, SizedFont};

/// A font family name, as configured by the caller ("Times New Roman",
/// "Source Code Pro", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Typeface(String);

impl Typeface {
    pub fn new(name: impl Into<String>) -> Typeface {
        Typeface(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Typeface {
    fn from(name: &str) -> Typeface {
        Typeface::new(name)
    }
}

/// The style variant of a typeface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontVariant {
    Regular,
    Bold,
    Italic,
    BoldItalic,
    SmallCaps,
}

/// Cache key: a typeface in a particular variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypefaceVariant {
    pub typeface: Typeface,
    pub variant: FontVariant,
}

impl TypefaceVariant {
    pub fn new(typeface: Typeface, variant: FontVariant) -> TypefaceVariant {
        TypefaceVariant { typeface, variant }
    }
}

/// The hook through which fonts are actually loaded. Called lazily on first
/// request for a typeface/variant; loading is allowed to block on disk.
pub type FontLoader = dyn Fn(&TypefaceVariant) -> Result<FontRef, FontError> + Send + Sync;

/// Loads and caches fonts.
///
/// The cache is safe for concurrent readers and writers. On a race, the
/// loader may be invoked more than once for a key; the results must be
/// deterministic, so whichever insert lands is equivalent.
pub struct FontManager {
    loader: Box<FontLoader>,
    fallback_typeface: Option<Typeface>,
    cache: RwLock<HashMap<TypefaceVariant, FontRef>>,
}

impl FontManager {
    pub fn new(loader: Box<FontLoader>) -> FontManager {
        FontManager {
            loader,
            fallback_typeface: None,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Configure a fallback typeface. Sized fonts returned by [`get_sized`]
    /// will then fail over to this typeface for uncovered codepoints.
    ///
    /// [`get_sized`]: FontManager::get_sized
    pub fn with_fallback(mut self, typeface: Typeface) -> FontManager {
        self.fallback_typeface = Some(typeface);
        self
    }

    /// Fetch a font, loading it on first use.
    pub fn get(&self, typeface_variant: &TypefaceVariant) -> Result<FontRef, FontError> {
        if let Ok(cache) = self.cache.read() {
            if let Some(font) = cache.get(typeface_variant) {
                return Ok(font.clone());
            }
        }

        log::debug!(
            "loading font {} {:?}",
            typeface_variant.typeface,
            typeface_variant.variant
        );
        let font = (self.loader)(typeface_variant)?;

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(typeface_variant.clone(), font.clone());
        }

        Ok(font)
    }

    /// Fetch a font at a size. When a fallback typeface is configured, the
    /// returned font is a failover composition of the requested typeface and
    /// the fallback at the same size.
    pub fn get_sized(
        &self,
        typeface: &Typeface,
        variant: FontVariant,
        size: f64,
    ) -> Result<SizedFont, FontError> {
        let mut font = self.get(&TypefaceVariant::new(typeface.clone(), variant))?;

        if let Some(fallback_typeface) = &self.fallback_typeface {
            let fallback = self.get(&TypefaceVariant::new(fallback_typeface.clone(), variant))?;
            font = Arc::new(FailoverFont::new(font, fallback));
        }

        Ok(SizedFont::new(font, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContentSink, Font, Metrics, RenderError};
    use quire_types::Sp;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubFont;

    impl Font for StubFont {
        fn has_character(&self, _ch: char) -> bool {
            true
        }
        fn space_width(&self, _size: f64) -> Sp {
            0
        }
        fn character_metrics(&self, _ch: char, _size: f64) -> Metrics {
            Metrics::default()
        }
        fn kerning(&self, _left: char, _right: char, _size: f64) -> Sp {
            0
        }
        fn draw(
            &self,
            _text: &str,
            _size: f64,
            _x: Sp,
            _y: Sp,
            _sink: &mut dyn ContentSink,
        ) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[test]
    fn loads_each_key_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let manager = FontManager::new(Box::new(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(StubFont) as FontRef)
        }));

        let key = TypefaceVariant::new(Typeface::new("Test"), FontVariant::Regular);
        manager.get(&key).unwrap();
        manager.get(&key).unwrap();
        manager.get(&key).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let other = TypefaceVariant::new(Typeface::new("Test"), FontVariant::Bold);
        manager.get(&other).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn get_sized_composes_fallback() {
        let manager = FontManager::new(Box::new(|tv| {
            if tv.typeface.name() == "Missing" {
                Err(FontError::NotFound {
                    typeface: tv.typeface.name().to_string(),
                    variant: tv.variant,
                })
            } else {
                Ok(Arc::new(StubFont) as FontRef)
            }
        }))
        .with_fallback(Typeface::new("Fallback"));

        let sized = manager
            .get_sized(&Typeface::new("Main"), FontVariant::Regular, 11.0)
            .unwrap();
        assert!((sized.size() - 11.0).abs() < 1e-9);

        // A failing primary load surfaces the error.
        assert!(manager
            .get_sized(&Typeface::new("Missing"), FontVariant::Regular, 11.0)
            .is_err());
    }
}
