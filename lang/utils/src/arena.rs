use std::{
    ops::{Index, IndexMut},
    sync::atomic::{AtomicUsize, Ordering},
};

/* ---------------------------------- Index --------------------------------- */

pub use crate::new_key_type;

/// Keys handed out by an [`IndexAlloc`].
///
/// # Safety
/// `index` must return the position the key was allocated with, since dense
/// arenas use it to address their backing vector directly.
pub unsafe trait IndexLike: Clone + Copy + Eq + std::hash::Hash {
    type Meta;
    fn new(meta: Self::Meta, idx: usize) -> Self;
    fn meta(&self) -> Self::Meta;
    fn index(&self) -> usize;
}

/* -------------------------------- Allocator ------------------------------- */

/// Sequential index allocator; every index is tagged with the same `Meta`.
#[derive(Debug, Clone)]
pub struct IndexAlloc<Meta>(Meta, usize);

impl<Meta: Copy> IndexAlloc<Meta> {
    pub fn meta(&self) -> Meta {
        self.0
    }
    pub fn bump(&mut self) -> (Meta, usize) {
        let old = self.1;
        self.1 += 1;
        (self.0, old)
    }
}

static GENERATION: AtomicUsize = AtomicUsize::new(0);

/// Process-wide source of allocator generations.
///
/// Every call to [`GlobalAlloc::alloc`] yields an allocator whose meta differs from
/// all previously issued ones, so keys from two allocators never collide even when
/// their indices do.
pub struct GlobalAlloc;

impl GlobalAlloc {
    pub fn alloc() -> IndexAlloc<usize> {
        IndexAlloc(GENERATION.fetch_add(1, Ordering::Relaxed), 0)
    }
}

/* ---------------------------------- Arena --------------------------------- */

pub trait ArenaAccess<Id, T, Meta>: Index<Id, Output = T> + IndexMut<Id, Output = T> {
    fn get(&self, id: Id) -> Option<&T>;
    fn get_mut(&mut self, id: Id) -> Option<&mut T>;
}

/// Append-only arena whose keys carry the generation of its allocator.
///
/// Lookups with a key of another generation miss, they never alias.
#[derive(Debug, Clone)]
pub struct ArenaDense<Id, T, Meta = usize> {
    allocator: IndexAlloc<Meta>,
    vec: Vec<T>,
    _marker: std::marker::PhantomData<Id>,
}

mod impls {
    use super::*;

    impl<Id, T, Meta> Index<&Id> for ArenaDense<Id, T, Meta>
    where
        Meta: Copy + Eq,
        Id: IndexLike<Meta = Meta>,
    {
        type Output = T;
        fn index(&self, id: &Id) -> &Self::Output {
            self.get(id).expect("key from a foreign arena")
        }
    }
    impl<Id, T, Meta> IndexMut<&Id> for ArenaDense<Id, T, Meta>
    where
        Meta: Copy + Eq,
        Id: IndexLike<Meta = Meta>,
    {
        fn index_mut(&mut self, id: &Id) -> &mut Self::Output {
            self.get_mut(id).expect("key from a foreign arena")
        }
    }

    impl<Id, T, Meta> ArenaDense<Id, T, Meta>
    where
        Meta: Copy + Eq,
        Id: IndexLike<Meta = Meta>,
    {
        pub fn new(allocator: IndexAlloc<Meta>) -> Self {
            ArenaDense { allocator, vec: Vec::new(), _marker: std::marker::PhantomData }
        }
        pub fn alloc(&mut self, val: T) -> Id {
            let (meta, idx) = self.allocator.bump();
            self.vec.push(val);
            IndexLike::new(meta, idx)
        }
        /// Whether `id` was allocated by this arena.
        pub fn owns(&self, id: &Id) -> bool {
            id.meta() == self.allocator.meta() && id.index() < self.vec.len()
        }
    }

    impl<Id, T, Meta> ArenaAccess<&Id, T, Meta> for ArenaDense<Id, T, Meta>
    where
        Meta: Copy + Eq,
        Id: IndexLike<Meta = Meta>,
    {
        fn get(&self, id: &Id) -> Option<&T> {
            if !self.owns(id) {
                return None;
            }
            self.vec.get(id.index())
        }
        fn get_mut(&mut self, id: &Id) -> Option<&mut T> {
            if !self.owns(id) {
                return None;
            }
            self.vec.get_mut(id.index())
        }
    }
}

#[macro_export]
macro_rules! new_key_type {
    ( $(#[$outer:meta])* $vis:vis struct $name:ident < $meta:ty > ; $($rest:tt)* ) => {
        $(#[$outer])*
        #[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
        $vis struct $name($meta, usize);

        unsafe impl $crate::arena::IndexLike for $name {
            type Meta = $meta;
            fn new(meta: Self::Meta, idx: usize) -> Self {
                Self(meta, idx)
            }
            fn meta(&self) -> Self::Meta {
                self.0
            }
            fn index(&self) -> usize {
                self.1
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({:?}, {})", stringify!($name), self.0, self.1)
            }
        }

        impl $name {
            pub fn concise(&self) -> String {
                format!("[{:?}#{:?}]", self.0, self.1)
            }
        }

        $crate::new_key_type!($($rest)*);
    };

    ( $(#[$outer:meta])* $vis:vis struct $name:ident ; $($rest:tt)* ) => {
        $crate::new_key_type!( $(#[$outer])* $vis struct $name<usize> ; $($rest)* );
    };

    () => {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    new_key_type! {
        struct Key;
    }

    #[test]
    fn generations_do_not_alias() {
        let mut a: ArenaDense<Key, &str> = ArenaDense::new(GlobalAlloc::alloc());
        let mut b: ArenaDense<Key, &str> = ArenaDense::new(GlobalAlloc::alloc());
        let ka = a.alloc("a");
        let kb = b.alloc("b");
        assert_eq!(ka.index(), kb.index());
        assert_ne!(ka, kb);
        assert_eq!(a.get(&ka), Some(&"a"));
        assert_eq!(a.get(&kb), None);
        assert!(!b.owns(&ka));
    }
}
