use core::{fmt, ops::Deref};

/// Fixed capacity vector. Items past `CAP` are refused, never reallocated.
#[derive(Clone, Copy)]
pub struct BoundedVec<T: Copy + Default, const CAP: usize> {
	data: [T; CAP],
	len: usize,
}

impl<T: Copy + Default, const CAP: usize> BoundedVec<T, CAP> {
	pub fn new() -> Self {
		Self {
			data: [T::default(); CAP],
			len: 0,
		}
	}

	pub const fn capacity(&self) -> usize {
		CAP
	}

	pub fn full(&self) -> bool {
		self.len == CAP
	}

	/// # Return
	///
	/// `Err(item)` when there is no room left.
	pub fn push(&mut self, item: T) -> Result<(), T> {
		if self.full() {
			return Err(item);
		}

		self.data[self.len] = item;
		self.len += 1;

		Ok(())
	}

	pub fn clear(&mut self) {
		self.len = 0;
	}

	pub fn as_slice(&self) -> &[T] {
		&self.data[..self.len]
	}
}

impl<T: Copy + Default, const CAP: usize> Default for BoundedVec<T, CAP> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Copy + Default + PartialEq, const CAP: usize> PartialEq for BoundedVec<T, CAP> {
	fn eq(&self, other: &Self) -> bool {
		self.as_slice() == other.as_slice()
	}
}

impl<T: Copy + Default + Eq, const CAP: usize> Eq for BoundedVec<T, CAP> {}

impl<T: Copy + Default, const CAP: usize> Deref for BoundedVec<T, CAP> {
	type Target = [T];

	fn deref(&self) -> &Self::Target {
		self.as_slice()
	}
}

impl<T: Copy + Default + fmt::Debug, const CAP: usize> fmt::Debug for BoundedVec<T, CAP> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.as_slice()).finish()
	}
}

/// Collects at most `CAP` items, the rest are ignored.
impl<T: Copy + Default, const CAP: usize> FromIterator<T> for BoundedVec<T, CAP> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut vec = Self::new();

		for item in iter.into_iter().take(CAP) {
			let _ = vec.push(item);
		}

		vec
	}
}
