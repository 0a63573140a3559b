//! Handle-based asset cache.
//!
//! Sources (`T`) are realized into resources by an [`AssetLoader`] when they
//! are added; afterwards they are addressed only through a typed [`Handle`].

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::error::{CornersError, CornersErrorKind};

/// Opaque key of an asset of kind `T`.
///
/// Keys are handed out in increasing order and never reused within one
/// [`Assets`] cache.
pub struct Handle<T> {
    id: u64,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(id: u64) -> Self {
        Self {
            id,
            _kind: PhantomData,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

// Implemented by hand so `T` carries no bounds.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Handle<T> {}

impl<T> PartialOrd for Handle<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Handle<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.id)
    }
}

impl<T> Serialize for Handle<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.id)
    }
}

/// Turns an asset source into a usable resource.
pub trait AssetLoader<T> {
    type Resource;

    fn open(&mut self, source: &T) -> Result<Self::Resource, CornersError>;
}

/// Loaded resources of one kind, keyed by handle.
pub struct Assets<T, R> {
    next_id: u64,
    resources: HashMap<Handle<T>, R>,
}

impl<T: fmt::Debug, R> Assets<T, R> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            resources: HashMap::new(),
        }
    }

    /// Loads `source` and stores the result. A failed load leaves the cache
    /// unchanged and consumes no handle.
    #[instrument(skip(self, loader))]
    pub fn add<L>(&mut self, source: T, loader: &mut L) -> Result<Handle<T>, CornersError>
    where
        L: AssetLoader<T, Resource = R>,
    {
        let resource = loader.open(&source).inspect_err(|err| {
            warn!(%err, "asset load failed");
        })?;
        let handle = Handle::new(self.next_id);
        self.next_id += 1;
        self.resources.insert(handle, resource);
        debug!(?handle, "asset added");
        Ok(handle)
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&R> {
        self.resources.get(&handle)
    }

    /// Like [`Assets::get`], for callers that hold a handle from this cache.
    pub fn require(&self, handle: Handle<T>) -> Result<&R, CornersError> {
        self.get(handle).ok_or_else(|| {
            CornersError::new(CornersErrorKind::Asset(format!("unknown asset {handle:?}")))
        })
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl<T: fmt::Debug, R> Default for Assets<T, R> {
    fn default() -> Self {
        Self::new()
    }
}

/// A texture source: an image path relative to the host's asset root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Texture {
    pub path: String,
}

impl Texture {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// What a host knows about a texture once it has accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureInfo {
    pub path: String,
}

/// Loader for hosts that decode images themselves (the browser, the replay
/// tool): a texture is accepted as long as its path is usable.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathLoader;

impl AssetLoader<Texture> for PathLoader {
    type Resource = TextureInfo;

    fn open(&mut self, source: &Texture) -> Result<TextureInfo, CornersError> {
        if source.path.trim().is_empty() {
            return Err(CornersError::new(CornersErrorKind::Asset(
                "texture path is empty".to_string(),
            )));
        }
        Ok(TextureInfo {
            path: source.path.clone(),
        })
    }
}

/// All asset caches of a session.
#[derive(Default)]
pub struct AssetManager {
    pub textures: Assets<Texture, TextureInfo>,
}

impl AssetManager {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingLoader;

    impl AssetLoader<Texture> for FailingLoader {
        type Resource = TextureInfo;

        fn open(&mut self, source: &Texture) -> Result<TextureInfo, CornersError> {
            Err(CornersError::new(CornersErrorKind::Asset(format!(
                "cannot open {}",
                source.path
            ))))
        }
    }

    #[test]
    fn handles_are_unique_and_increasing() {
        let mut assets = AssetManager::new();
        let mut loader = PathLoader;

        let board = assets.textures.add(Texture::new("assets/board.png"), &mut loader).unwrap();
        let white = assets.textures.add(Texture::new("assets/white.png"), &mut loader).unwrap();

        assert!(board < white);
        assert_ne!(board, white);
        assert_eq!(assets.textures.len(), 2);
        assert_eq!(assets.textures.get(white).unwrap().path, "assets/white.png");
    }

    #[test]
    fn failed_load_consumes_no_handle() {
        let mut textures: Assets<Texture, TextureInfo> = Assets::new();

        let err = textures.add(Texture::new("missing.png"), &mut FailingLoader).unwrap_err();
        assert!(err.to_string().contains("missing.png"));
        assert!(textures.is_empty());

        let handle = textures.add(Texture::new("ok.png"), &mut PathLoader).unwrap();
        assert_eq!(handle.id(), 0);
    }

    #[test]
    fn path_loader_rejects_blank_paths() {
        let mut textures: Assets<Texture, TextureInfo> = Assets::new();

        assert!(textures.add(Texture::new("  "), &mut PathLoader).is_err());
    }

    #[test]
    fn unknown_handle_is_reported() {
        let mut first: Assets<Texture, TextureInfo> = Assets::new();
        let second: Assets<Texture, TextureInfo> = Assets::new();
        let handle = first.add(Texture::new("a.png"), &mut PathLoader).unwrap();

        assert!(second.get(handle).is_none());
        assert!(second.require(handle).is_err());
        assert!(first.require(handle).is_ok());
    }
}
