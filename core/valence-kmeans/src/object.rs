/// One object under clustering: a unique key, its value normalized into
/// `(0, 1]`, the raw value it came from, and the centroid it currently sits on.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteredObject<K> {
    key: K,
    value: f64,
    original: u64,
    centroid: f64,
}

impl<K> ClusteredObject<K> {
    pub(crate) fn new(key: K, original: u64, scale: u64) -> Self {
        Self {
            key,
            value: original as f64 / scale as f64,
            original,
            centroid: 0.0,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn into_key(self) -> K {
        self.key
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn original(&self) -> u64 {
        self.original
    }

    pub fn centroid(&self) -> f64 {
        self.centroid
    }

    pub(crate) fn set_centroid(&mut self, centroid: f64) {
        self.centroid = centroid;
    }

    pub fn distance(&self) -> f64 {
        (self.value - self.centroid).abs()
    }
}
