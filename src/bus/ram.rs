/*!
RAM module: the flat 64 KiB CPU address space backing store.

Every address that the bus does not intercept (video registers, DMA, mapper
writes) lands here directly. The cartridge window 0x8000-0xFFFF is also held
in this array; mappers copy program-ROM banks into it, and the CPU reads
them back with plain loads. There is no mirroring at this layer.
*/

/// Size of the CPU address space (in bytes).
pub const ADDRESS_SPACE_SIZE: usize = 0x10000;

/// Flat byte-addressable CPU memory.
pub struct Ram {
    data: Box<[u8]>,
}

impl Default for Ram {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Ram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ram")
            .field("len", &self.data.len())
            .finish()
    }
}

impl Ram {
    /// Create a new address space initialized to 0.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: vec![0; ADDRESS_SPACE_SIZE].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    /// Copy `bytes` in starting at `start`. Bytes that would fall past
    /// 0xFFFF are dropped.
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        let start = start as usize;
        let len = bytes.len().min(ADDRESS_SPACE_SIZE - start);
        self.data[start..start + len].copy_from_slice(&bytes[..len]);
    }

    /// The 256-byte page `page * 0x100`.
    #[inline]
    pub fn page(&self, page: u8) -> &[u8] {
        let start = (page as usize) << 8;
        &self.data[start..start + 0x100]
    }
}
