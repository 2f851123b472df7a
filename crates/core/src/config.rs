#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Expected number of distinct classes and methods.
    pub initial_capacity: usize,
    /// Cache shard count; a power of two greater than one.
    pub shard_amount: usize,
    /// Skip method-level inspection for actions without bound arguments.
    pub skip_argumentless_methods: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 256,
            shard_amount: 32,
            skip_argumentless_methods: true,
        }
    }
}

impl ResolverConfig {
    /// Shard count accepted by the cache: rounded up to a power of two, at least 2.
    pub(crate) fn effective_shards(&self) -> usize {
        self.shard_amount.max(2).next_power_of_two()
    }
}
