//! Cache implementation

use log::debug;
use log::info;
use log::trace;

use super::AccessOutcome;
use super::AccessType;
use super::WriteHitPolicy;
use super::WriteMissPolicy;
use crate::error::ConfigError;

pub fn get_log_2(value: usize) -> u32 {
    assert!(value > 0);
    usize::BITS - 1 - value.leading_zeros()
}

pub fn is_pow_2(value: usize) -> bool {
    value != 0 && value & (value - 1) == 0
}

pub fn get_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Single-level set-associative cache with LRU replacement.
///
/// Lines are stored set by set, so the ways of set `i` occupy
/// `lines[i * associativity..(i + 1) * associativity]`.
pub struct Cache {
    config: CacheConfig,
    geometry: CacheGeometry,

    history: CacheHistory,

    offset_mask: u64,
    index_mask: u64,
    address_mask: u64,

    lines: Vec<Line>,

    // LRU clock, advanced once per access
    ref_counter: u64,
}

// Addresses look like this:
// | tag | index | offset |
// with anything above the configured address width ignored
impl Cache {
    pub fn make(config: CacheConfig) -> Result<Self, ConfigError> {
        let geometry = config.validate()?;

        // Every (way, set) cell starts out invalid
        let mut lines =
            vec![Line::default(); geometry.num_sets * config.associativity];
        for (i, line) in lines.iter_mut().enumerate() {
            line.index = i / config.associativity;
        }

        info!(
            "cache: {} sets x {} ways, {} B lines, tag/index/offset = {}/{}/{} bits",
            geometry.num_sets,
            config.associativity,
            config.line_size,
            geometry.tag_bits,
            geometry.index_bits,
            geometry.offset_bits
        );

        Ok(Self {
            config,
            geometry,
            history: CacheHistory::default(),
            offset_mask: get_mask(geometry.offset_bits),
            index_mask: get_mask(geometry.index_bits),
            address_mask: get_mask(config.address_width),
            lines,
            ref_counter: 0,
        })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn geometry(&self) -> CacheGeometry {
        self.geometry
    }

    pub fn history(&self) -> &CacheHistory {
        &self.history
    }

    /// Current value of the LRU clock
    pub fn ref_counter(&self) -> u64 {
        self.ref_counter
    }

    pub fn get_offset(&self, address: u64) -> u64 {
        address & self.offset_mask
    }

    pub fn get_index(&self, address: u64) -> usize {
        ((address >> self.geometry.offset_bits) & self.index_mask) as usize
    }

    pub fn get_tag(&self, address: u64) -> u64 {
        (address & self.address_mask)
            .checked_shr(self.geometry.offset_bits + self.geometry.index_bits)
            .unwrap_or(0)
    }

    /// Inverse of the decomposition above
    pub fn compose_address(&self, tag: u64, index: usize, offset: u64) -> u64 {
        let tag_part = tag
            .checked_shl(self.geometry.offset_bits + self.geometry.index_bits)
            .unwrap_or(0);
        let index_part = ((index as u64) & self.index_mask)
            << self.geometry.offset_bits;
        tag_part | index_part | (offset & self.offset_mask)
    }

    /// Base address of the block held by the given line
    pub fn get_address(&self, line: &Line) -> u64 {
        self.compose_address(line.tag, line.index, 0)
    }

    pub fn line(&self, way: usize, set: usize) -> &Line {
        assert!(way < self.config.associativity);
        &self.lines[set * self.config.associativity + way]
    }

    fn line_mut(&mut self, way: usize, set: usize) -> &mut Line {
        assert!(way < self.config.associativity);
        &mut self.lines[set * self.config.associativity + way]
    }

    fn set(&self, set: usize) -> &[Line] {
        let begin = set * self.config.associativity;
        &self.lines[begin..begin + self.config.associativity]
    }

    /// All lines as `(way, set, line)`, way by way
    pub fn lines(&self) -> impl Iterator<Item = (usize, usize, &Line)> + '_ {
        (0..self.config.associativity).flat_map(move |way| {
            (0..self.geometry.num_sets)
                .map(move |set| (way, set, self.line(way, set)))
        })
    }

    pub fn valid_lines_in_set(&self, set: usize) -> usize {
        self.set(set).iter().filter(|line| line.valid).count()
    }

    pub fn is_in_cache(&self, address: u64) -> bool {
        self.lookup(address).is_some()
    }

    /// Find the way holding the address without touching LRU state
    pub fn lookup(&self, address: u64) -> Option<usize> {
        let tag = self.get_tag(address);
        let index = self.get_index(address);
        self.set(index)
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Lookup that refreshes the LRU timestamp of the matching line
    fn probe(&mut self, address: u64) -> Option<usize> {
        let way = self.lookup(address)?;
        let index = self.get_index(address);
        let ref_counter = self.ref_counter;
        self.line_mut(way, index).last_ref = ref_counter;
        Some(way)
    }

    pub fn access(
        &mut self,
        access_type: AccessType,
        address: u64,
    ) -> AccessOutcome {
        match access_type {
            AccessType::Read => self.read(address),
            AccessType::Write => self.write(address),
        }
    }

    /// Process a read; reads always allocate on a miss
    pub fn read(&mut self, address: u64) -> AccessOutcome {
        self.history.num_read += 1;

        let outcome = if self.probe(address).is_some() {
            self.history.num_hit += 1;
            AccessOutcome::Hit
        } else {
            self.history.num_read_miss += 1;
            self.allocate(address);
            AccessOutcome::Miss
        };

        self.finish_access(AccessType::Read, address, outcome)
    }

    /// Process a write according to the write-hit and write-miss policies
    pub fn write(&mut self, address: u64) -> AccessOutcome {
        self.history.num_write += 1;

        let outcome = if let Some(way) = self.probe(address) {
            self.history.num_hit += 1;
            match self.config.write_hit_policy {
                WriteHitPolicy::WriteBack => {
                    let index = self.get_index(address);
                    self.line_mut(way, index).dirty = true;
                }
                WriteHitPolicy::WriteThrough => {
                    self.history.num_memory_write += 1;
                }
            }
            AccessOutcome::Hit
        } else {
            self.history.num_write_miss += 1;
            match self.config.write_miss_policy {
                WriteMissPolicy::WriteAllocate => {
                    let way = self.allocate(address);
                    match self.config.write_hit_policy {
                        WriteHitPolicy::WriteBack => {
                            // Flushed when the line is evicted
                            let index = self.get_index(address);
                            self.line_mut(way, index).dirty = true;
                        }
                        WriteHitPolicy::WriteThrough => {
                            self.history.num_memory_write += 1;
                        }
                    }
                }
                WriteMissPolicy::WriteNoAllocate => {
                    // Bypass the cache entirely
                    self.history.num_memory_write += 1;
                }
            }
            AccessOutcome::Miss
        };

        self.finish_access(AccessType::Write, address, outcome)
    }

    fn finish_access(
        &mut self,
        access_type: AccessType,
        address: u64,
        outcome: AccessOutcome,
    ) -> AccessOutcome {
        trace!(
            "#{} {:?} {:#x} -> {}",
            self.ref_counter,
            access_type,
            address,
            outcome
        );
        self.history.num_access += 1;
        self.ref_counter += 1;
        outcome
    }

    /// Install the block holding `address` and return the way used.
    /// An invalid way is filled first; otherwise the LRU way is evicted,
    /// flushing it to memory if dirty.
    fn allocate(&mut self, address: u64) -> usize {
        let tag = self.get_tag(address);
        let index = self.get_index(address);

        let way = match self.set(index).iter().position(|line| !line.valid) {
            Some(way) => way,
            None => {
                let victim = self.get_way_to_replace(index);
                let replaced = *self.line(victim, index);
                self.history.num_eviction += 1;
                if replaced.dirty {
                    self.history.num_memory_write += 1;
                }
                debug!(
                    "evict set {} way {}: tag {:#x}{}",
                    index,
                    victim,
                    replaced.tag,
                    if replaced.dirty { " (dirty, flushed)" } else { "" }
                );
                victim
            }
        };

        let ref_counter = self.ref_counter;
        *self.line_mut(way, index) = Line {
            valid: true,
            dirty: false,
            tag,
            index,
            last_ref: ref_counter,
        };
        way
    }

    /// Pick the least recently used way of the set.
    ///
    /// The scan replaces the current candidate whenever a way is at least as
    /// old, so among equal timestamps the highest way wins.
    pub fn get_way_to_replace(&self, index: usize) -> usize {
        let mut result = 0;
        let mut oldest = self.ref_counter;
        for (way, line) in self.set(index).iter().enumerate() {
            if oldest >= line.last_ref {
                oldest = line.last_ref;
                result = way;
            }
        }
        result
    }

    /// Average memory access time, `None` before any access
    pub fn get_amat(&self) -> Option<f64> {
        self.history.miss_rate().map(|miss_rate| {
            self.config.miss_penalty as f64 * miss_rate
                + self.config.hit_time as f64
        })
    }
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Line {
    pub valid: bool,
    pub dirty: bool,

    pub tag: u64,
    pub index: usize,

    pub last_ref: u64,
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct CacheHistory {
    pub num_access: u64,
    pub num_read: u64,
    pub num_read_miss: u64,
    pub num_write: u64,
    pub num_write_miss: u64,
    pub num_hit: u64,
    pub num_eviction: u64,
    pub num_memory_write: u64,
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

impl CacheHistory {
    pub fn num_miss(&self) -> u64 {
        self.num_read_miss + self.num_write_miss
    }

    pub fn read_miss_rate(&self) -> Option<f64> {
        ratio(self.num_read_miss, self.num_read)
    }

    pub fn write_miss_rate(&self) -> Option<f64> {
        ratio(self.num_write_miss, self.num_write)
    }

    pub fn miss_rate(&self) -> Option<f64> {
        ratio(self.num_miss(), self.num_access)
    }

    pub fn hit_rate(&self) -> Option<f64> {
        ratio(self.num_hit, self.num_access)
    }
}

/// Sizing derived from a validated configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheGeometry {
    pub num_sets: usize,
    pub offset_bits: u32,
    pub index_bits: u32,
    pub tag_bits: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    pub cache_size: usize,
    pub associativity: usize,
    pub line_size: usize,

    pub write_hit_policy: WriteHitPolicy,
    pub write_miss_policy: WriteMissPolicy,

    pub hit_time: u32,
    pub miss_penalty: u32,

    pub address_width: u32,
}

impl Default for CacheConfig {
    /// 16 KB direct-mapped, write-through, no-write-allocate
    fn default() -> Self {
        Self::new(
            16 * 1024,
            1,
            64,
            WriteHitPolicy::WriteThrough,
            WriteMissPolicy::WriteNoAllocate,
            5,
            100,
            48,
        )
    }
}

impl CacheConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cache_size: usize,
        associativity: usize,
        line_size: usize,
        write_hit_policy: WriteHitPolicy,
        write_miss_policy: WriteMissPolicy,
        hit_time: u32,
        miss_penalty: u32,
        address_width: u32,
    ) -> Self {
        Self {
            cache_size,
            associativity,
            line_size,
            write_hit_policy,
            write_miss_policy,
            hit_time,
            miss_penalty,
            address_width,
        }
    }

    /// Check the sizing constraints and compute the derived geometry
    pub fn validate(&self) -> Result<CacheGeometry, ConfigError> {
        if self.cache_size == 0 {
            return Err(ConfigError::Zero("cache size"));
        }
        if self.associativity == 0 {
            return Err(ConfigError::Zero("associativity"));
        }
        if self.line_size == 0 {
            return Err(ConfigError::Zero("line size"));
        }
        if !is_pow_2(self.line_size) {
            return Err(ConfigError::NotPowerOfTwo {
                name: "line size",
                value: self.line_size as u64,
            });
        }
        if !is_pow_2(self.associativity) {
            return Err(ConfigError::NotPowerOfTwo {
                name: "associativity",
                value: self.associativity as u64,
            });
        }

        let set_size = self
            .line_size
            .checked_mul(self.associativity)
            .filter(|set_size| self.cache_size % set_size == 0)
            .ok_or(ConfigError::UnevenSets {
                size: self.cache_size as u64,
                line_size: self.line_size as u64,
                associativity: self.associativity as u64,
            })?;
        let num_sets = self.cache_size / set_size;
        if !is_pow_2(num_sets) {
            return Err(ConfigError::NotPowerOfTwo {
                name: "number of sets",
                value: num_sets as u64,
            });
        }

        if self.address_width == 0 || self.address_width > u64::BITS {
            return Err(ConfigError::AddressWidth(self.address_width));
        }

        let offset_bits = get_log_2(self.line_size);
        let index_bits = get_log_2(num_sets);
        if offset_bits + index_bits > self.address_width {
            return Err(ConfigError::NoTagBits {
                offset_bits,
                index_bits,
                address_width: self.address_width,
            });
        }

        Ok(CacheGeometry {
            num_sets,
            offset_bits,
            index_bits,
            tag_bits: self.address_width - offset_bits - index_bits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KB: usize = 1024;

    fn make_cache(
        cache_size: usize,
        associativity: usize,
        line_size: usize,
        write_hit_policy: WriteHitPolicy,
        write_miss_policy: WriteMissPolicy,
    ) -> Cache {
        Cache::make(CacheConfig::new(
            cache_size,
            associativity,
            line_size,
            write_hit_policy,
            write_miss_policy,
            5,
            100,
            48,
        ))
        .unwrap()
    }

    /// 256 B, 2-way, 64 B lines: 2 sets, index bit 6, tag from bit 7
    fn two_way(
        write_hit_policy: WriteHitPolicy,
        write_miss_policy: WriteMissPolicy,
    ) -> Cache {
        make_cache(256, 2, 64, write_hit_policy, write_miss_policy)
    }

    #[test]
    fn test_get_log_2() {
        for n in 1..123457 {
            let expected = {
                let mut count = 0;
                let mut t = n;
                while t > 1 {
                    count += 1;
                    t >>= 1;
                }
                count
            };
            assert_eq!(expected, get_log_2(n));
        }
    }

    #[test]
    fn test_is_pow_2() {
        assert!(is_pow_2(1));
        assert!(is_pow_2(64));
        assert!(!is_pow_2(0));
        assert!(!is_pow_2(48));
    }

    #[test]
    fn test_get_mask() {
        assert_eq!(get_mask(0), 0);
        assert_eq!(get_mask(6), 0x3f);
        assert_eq!(get_mask(64), u64::MAX);
    }

    #[test]
    fn test_default_geometry() {
        let geometry = CacheConfig::default().validate().unwrap();
        assert_eq!(
            geometry,
            CacheGeometry {
                num_sets: 256,
                offset_bits: 6,
                index_bits: 8,
                tag_bits: 34,
            }
        );
    }

    #[test]
    fn test_invalid_configs() {
        let base = CacheConfig::default();

        let config = CacheConfig { cache_size: 0, ..base };
        assert_eq!(config.validate(), Err(ConfigError::Zero("cache size")));

        let config = CacheConfig { line_size: 48, ..base };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPowerOfTwo { name: "line size", value: 48 })
        ));

        let config = CacheConfig { associativity: 3, ..base };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPowerOfTwo { name: "associativity", .. })
        ));

        let config = CacheConfig { cache_size: 1000, ..base };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnevenSets { .. })
        ));

        let config = CacheConfig { cache_size: 3 * 64, ..base };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPowerOfTwo { name: "number of sets", value: 3 })
        ));

        let config = CacheConfig { address_width: 65, ..base };
        assert_eq!(config.validate(), Err(ConfigError::AddressWidth(65)));

        // 6 offset bits + 8 index bits
        let config = CacheConfig { address_width: 13, ..base };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoTagBits { offset_bits: 6, index_bits: 8, .. })
        ));
        let config = CacheConfig { address_width: 14, ..base };
        assert_eq!(config.validate().unwrap().tag_bits, 0);
    }

    #[test]
    fn test_all_lines_start_invalid() {
        let cache = Cache::make(CacheConfig {
            associativity: 4,
            ..CacheConfig::default()
        })
        .unwrap();
        assert_eq!(cache.lines().count(), 256);
        for (way, set, line) in cache.lines() {
            assert!(!line.valid, "way {} set {} is valid", way, set);
            assert!(!line.dirty);
            assert_eq!(line.index, set);
        }
        assert_eq!(*cache.history(), CacheHistory::default());
        assert_eq!(cache.ref_counter(), 0);
    }

    #[test]
    fn test_decomposition() {
        let cache = Cache::make(CacheConfig::default()).unwrap();
        let address = 0x1234_5678_9abc_u64;
        assert_eq!(cache.get_offset(address), 0x3c);
        assert_eq!(cache.get_index(address), 0x6a);
        assert_eq!(cache.get_tag(address), 0x1234_5678_9abc >> 14);
        assert_eq!(
            cache.compose_address(
                cache.get_tag(address),
                cache.get_index(address),
                cache.get_offset(address)
            ),
            address
        );
    }

    #[test]
    fn test_bits_above_width_are_ignored() {
        // 64 KB direct-mapped with 16-bit addresses leaves no tag bits
        let cache = Cache::make(CacheConfig {
            cache_size: 64 * KB,
            address_width: 16,
            ..CacheConfig::default()
        })
        .unwrap();
        assert_eq!(cache.geometry().tag_bits, 0);
        assert_eq!(cache.get_tag(0xffff_0000_ffff), 0);
        assert_eq!(cache.get_index(0x1_0040), 1);
    }

    #[test]
    fn test_hit_after_install() {
        let mut cache = two_way(
            WriteHitPolicy::WriteBack,
            WriteMissPolicy::WriteAllocate,
        );
        assert_eq!(cache.read(0x1000), AccessOutcome::Miss);
        assert_eq!(cache.read(0x1000), AccessOutcome::Hit);
        assert_eq!(cache.read(0x103f), AccessOutcome::Hit);
        assert_eq!(cache.write(0x1010), AccessOutcome::Hit);

        let history = cache.history();
        assert_eq!(history.num_read, 3);
        assert_eq!(history.num_read_miss, 1);
        assert_eq!(history.num_write, 1);
        assert_eq!(history.num_hit, 3);
        assert_eq!(history.num_access, 4);
        assert_eq!(cache.ref_counter(), 4);
    }

    #[test]
    fn test_probe_refreshes_lru() {
        let mut cache = two_way(
            WriteHitPolicy::WriteThrough,
            WriteMissPolicy::WriteAllocate,
        );
        // 0x000, 0x080, 0x100 all land in set 0
        cache.read(0x000);
        cache.read(0x080);
        cache.read(0x000);
        cache.read(0x100);

        assert!(cache.is_in_cache(0x000));
        assert!(!cache.is_in_cache(0x080));
        assert!(cache.is_in_cache(0x100));
        assert_eq!(cache.history().num_eviction, 1);
    }

    #[test]
    fn test_lookup_does_not_touch() {
        let mut cache = two_way(
            WriteHitPolicy::WriteThrough,
            WriteMissPolicy::WriteAllocate,
        );
        cache.read(0x000);
        cache.read(0x080);
        assert_eq!(cache.lookup(0x000), Some(0));
        cache.read(0x100);
        assert!(!cache.is_in_cache(0x000));
    }

    #[test]
    fn test_direct_mapped_always_evicts() {
        let mut cache = make_cache(
            KB,
            1,
            64,
            WriteHitPolicy::WriteThrough,
            WriteMissPolicy::WriteAllocate,
        );
        // 16 sets; stride of 1 KB keeps hitting set 0
        cache.read(0x0000);
        assert_eq!(cache.history().num_eviction, 0);
        for i in 1..10u64 {
            assert_eq!(cache.read(i * 0x400), AccessOutcome::Miss);
            assert_eq!(cache.history().num_eviction, i);
        }
    }

    #[test]
    fn test_lru_order() {
        for associativity in [1, 2, 4, 8] {
            let mut cache = make_cache(
                associativity * 4 * 64,
                associativity,
                64,
                WriteHitPolicy::WriteBack,
                WriteMissPolicy::WriteAllocate,
            );
            // 4 sets of 64 B lines: same set every 256 B
            let addresses: Vec<u64> =
                (0..=associativity as u64).map(|i| i * 0x100).collect();
            for address in &addresses {
                assert_eq!(cache.read(*address), AccessOutcome::Miss);
            }
            assert!(!cache.is_in_cache(addresses[0]));
            for address in &addresses[1..] {
                assert!(cache.is_in_cache(*address));
            }
            assert_eq!(cache.read(addresses[0]), AccessOutcome::Miss);
            assert_eq!(cache.valid_lines_in_set(0), associativity);
        }
    }

    #[test]
    fn test_tie_break_prefers_highest_way() {
        let mut cache = make_cache(
            4 * 64,
            4,
            64,
            WriteHitPolicy::WriteThrough,
            WriteMissPolicy::WriteAllocate,
        );
        for i in 0..4u64 {
            cache.read(i * 0x40);
        }
        cache.lines[0].last_ref = 1;
        cache.lines[1].last_ref = 1;
        cache.lines[2].last_ref = 1;
        cache.lines[3].last_ref = 2;
        assert_eq!(cache.get_way_to_replace(0), 2);

        cache.lines[3].last_ref = 0;
        assert_eq!(cache.get_way_to_replace(0), 3);
    }

    #[test]
    fn test_write_back_flushes_once() {
        let mut cache = make_cache(
            KB,
            1,
            64,
            WriteHitPolicy::WriteBack,
            WriteMissPolicy::WriteAllocate,
        );
        assert_eq!(cache.write(0x0000), AccessOutcome::Miss);
        assert!(cache.line(0, 0).dirty);
        assert_eq!(cache.history().num_memory_write, 0);

        assert_eq!(cache.write(0x0008), AccessOutcome::Hit);
        assert_eq!(cache.history().num_memory_write, 0);

        // Conflicting read evicts the dirty line
        assert_eq!(cache.read(0x0400), AccessOutcome::Miss);
        assert_eq!(cache.history().num_memory_write, 1);
        assert_eq!(cache.history().num_eviction, 1);
        assert!(!cache.line(0, 0).dirty);

        // The clean line goes away without another flush
        cache.read(0x0800);
        assert_eq!(cache.history().num_memory_write, 1);
        assert_eq!(cache.history().num_eviction, 2);
    }

    #[test]
    fn test_read_miss_is_clean() {
        let mut cache = two_way(
            WriteHitPolicy::WriteBack,
            WriteMissPolicy::WriteAllocate,
        );
        cache.read(0x40);
        assert!(cache.lines().all(|(_, _, line)| !line.dirty));
    }

    #[test]
    fn test_write_through_allocate() {
        let mut cache = two_way(
            WriteHitPolicy::WriteThrough,
            WriteMissPolicy::WriteAllocate,
        );
        assert_eq!(cache.write(0x40), AccessOutcome::Miss);
        assert!(cache.is_in_cache(0x40));
        assert_eq!(cache.history().num_memory_write, 1);
        assert_eq!(cache.write(0x40), AccessOutcome::Hit);
        assert_eq!(cache.history().num_memory_write, 2);
        assert!(cache.lines().all(|(_, _, line)| !line.dirty));
    }

    #[test]
    fn test_write_back_no_allocate() {
        let mut cache = two_way(
            WriteHitPolicy::WriteBack,
            WriteMissPolicy::WriteNoAllocate,
        );
        assert_eq!(cache.write(0x40), AccessOutcome::Miss);
        assert_eq!(cache.valid_lines_in_set(1), 0);
        assert_eq!(cache.history().num_memory_write, 1);

        cache.read(0x40);
        assert_eq!(cache.write(0x40), AccessOutcome::Hit);
        assert_eq!(cache.history().num_memory_write, 1);
        assert!(cache.line(0, 1).dirty);
    }

    #[test]
    fn test_no_write_allocate_leaves_table() {
        let mut cache = make_cache(
            KB,
            1,
            64,
            WriteHitPolicy::WriteThrough,
            WriteMissPolicy::WriteNoAllocate,
        );
        cache.read(0x0000);
        let before: Vec<Line> =
            cache.lines().map(|(_, _, line)| *line).collect();

        assert_eq!(cache.write(0x0400), AccessOutcome::Miss);
        let after: Vec<Line> =
            cache.lines().map(|(_, _, line)| *line).collect();
        assert_eq!(before, after);
        assert_eq!(cache.history().num_memory_write, 1);
        assert_eq!(cache.history().num_eviction, 0);
    }

    #[test]
    fn test_statistics() {
        let mut cache = two_way(
            WriteHitPolicy::WriteThrough,
            WriteMissPolicy::WriteNoAllocate,
        );
        assert_eq!(cache.history().miss_rate(), None);
        assert_eq!(cache.history().read_miss_rate(), None);
        assert_eq!(cache.get_amat(), None);

        cache.read(0x00);
        cache.read(0x00);
        cache.read(0x00);
        cache.write(0x40);

        let history = cache.history();
        assert_eq!(history.read_miss_rate(), Some(1.0 / 3.0));
        assert_eq!(history.write_miss_rate(), Some(1.0));
        assert_eq!(history.miss_rate(), Some(0.5));
        assert_eq!(history.hit_rate(), Some(0.5));
        // 100 * 2 / 4 + 5
        assert_eq!(cache.get_amat(), Some(55.0));
    }

    #[test]
    fn test_get_address() {
        let mut cache = two_way(
            WriteHitPolicy::WriteThrough,
            WriteMissPolicy::WriteAllocate,
        );
        cache.read(0x12345);
        let index = cache.get_index(0x12345);
        let way = cache.lookup(0x12345).unwrap();
        assert_eq!(cache.get_address(cache.line(way, index)), 0x12340);
    }
}
