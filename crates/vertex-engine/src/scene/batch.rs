use std::sync::Arc;

use bytemuck::Pod;

/// Immutable list of vertices uploaded once per draw call.
///
/// Cloning is cheap (shared storage), so a collaborator can keep the batch it
/// built last frame and hand it out again when nothing changed.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveBatch<V> {
    vertices: Arc<[V]>,
}

impl<V> Default for PrimitiveBatch<V> {
    fn default() -> Self {
        Self { vertices: Arc::from(Vec::new()) }
    }
}

impl<V> From<Vec<V>> for PrimitiveBatch<V> {
    fn from(vertices: Vec<V>) -> Self {
        Self { vertices: Arc::from(vertices) }
    }
}

impl<V> FromIterator<V> for PrimitiveBatch<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<V> PrimitiveBatch<V> {
    #[inline]
    pub fn new(vertices: Vec<V>) -> Self {
        Self::from(vertices)
    }

    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Leading vertices that form whole primitives of `arity` vertices each
    /// (3 for triangles, 2 for lines). A trailing partial primitive is excluded.
    #[inline]
    pub fn complete(&self, arity: usize) -> &[V] {
        let whole = self.vertices.len() - self.vertices.len() % arity.max(1);
        &self.vertices[..whole]
    }
}

impl<V: Pod> PrimitiveBatch<V> {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ColoredVertex;

    #[test]
    fn complete_drops_trailing_partial_triangle() {
        let batch: PrimitiveBatch<ColoredVertex> =
            (0..7).map(|i| ColoredVertex::new(i as f32, 0.0, 0)).collect();
        assert_eq!(batch.complete(3).len(), 6);
        assert_eq!(batch.complete(2).len(), 6);
        assert_eq!(batch.complete(1).len(), 7);
    }

    #[test]
    fn clones_share_storage() {
        let a = PrimitiveBatch::new(vec![ColoredVertex::new(0.0, 0.0, 1)]);
        let b = a.clone();
        assert!(std::ptr::eq(a.vertices().as_ptr(), b.vertices().as_ptr()));
    }

    #[test]
    fn bytes_cover_every_vertex() {
        let batch = PrimitiveBatch::new(vec![ColoredVertex::new(1.0, 2.0, 3); 4]);
        assert_eq!(batch.as_bytes().len(), 4 * std::mem::size_of::<ColoredVertex>());
    }
}
