/// An option wrapper that can be set once and then read many times.
///
/// `init` meaning the cell is empty and we're inserting the value
///
/// `get` meaning the cell is not empty and we're reading the value
#[derive(Clone, Debug)]
pub struct SingCell<T> {
    cell: Option<T>,
}

impl<T> SingCell<T> {
    pub fn new() -> Self {
        Self { cell: None }
    }
    /// Initialize the cell if it is empty, and return a reference to the value.
    /// If the cell is not empty, return an error built from the current value.
    pub fn init_or_else<E>(
        &mut self, init: impl FnOnce() -> T, err: impl FnOnce(&T) -> E,
    ) -> Result<&T, E> {
        if let Some(t) = &self.cell {
            return Err(err(t));
        }
        Ok(self.cell.insert(init()))
    }
    pub fn get(&self) -> Option<&T> {
        self.cell.as_ref()
    }
    pub fn is_init(&self) -> bool {
        self.cell.is_some()
    }
}

impl<T> Default for SingCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_once() {
        let mut cell = SingCell::new();
        assert!(!cell.is_init());
        assert_eq!(cell.init_or_else(|| 1, |_| ()), Ok(&1));
        assert_eq!(cell.init_or_else(|| 2, |old| *old), Err(1));
        assert_eq!(cell.get(), Some(&1));
    }
}
