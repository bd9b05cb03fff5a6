// ABOUTME: Generation-checked handle table for the host-binding boundary
// ABOUTME: Hands out packed integer handles so raw addresses never cross the ABI

use thiserror::Error;

/// Opaque handle passed across the runtime boundary: slot index in the low
/// 32 bits, slot generation in the high 32. Generations start at 1, so a
/// raw handle of 0 is never issued.
pub type RawHandle = u64;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleError {
    #[error("unknown handle")]
    Unknown,

    #[error("stale handle: object was disposed")]
    Stale,
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot arena with per-slot generations. Removing an entry bumps its slot
/// generation, so every handle issued for the old occupant turns stale
/// instead of aliasing the next one.
pub struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
}

impl<T> HandleTable<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn insert(&mut self, value: T) -> RawHandle {
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].value = Some(value);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 1,
                    value: Some(value),
                });
                self.slots.len() - 1
            }
        };
        pack(index, self.slots[index].generation)
    }

    pub fn get(&self, handle: RawHandle) -> Result<&T, HandleError> {
        let (index, generation) = unpack(handle);
        let slot = self.slots.get(index).ok_or(HandleError::Unknown)?;
        if slot.generation != generation {
            return Err(HandleError::Stale);
        }
        slot.value.as_ref().ok_or(HandleError::Stale)
    }

    pub fn remove(&mut self, handle: RawHandle) -> Result<T, HandleError> {
        let (index, generation) = unpack(handle);
        let slot = self.slots.get_mut(index).ok_or(HandleError::Unknown)?;
        if slot.generation != generation {
            return Err(HandleError::Stale);
        }
        let value = slot.value.take().ok_or(HandleError::Stale)?;
        // Invalidate every outstanding handle to this slot; keep the
        // generation nonzero so a reissued handle can never be 0
        slot.generation = slot.generation.wrapping_add(1).max(1);
        self.free.push(index);
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.value.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn pack(index: usize, generation: u32) -> RawHandle {
    ((generation as u64) << 32) | index as u64
}

fn unpack(handle: RawHandle) -> (usize, u32) {
    ((handle & 0xffff_ffff) as usize, (handle >> 32) as u32)
}
