//! Pagination functionality for grids

use std::num::NonZeroUsize;
use std::ops::Range;

/// Page position over a row count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
	/// Number of rows per page
	pub page_size: usize,
	/// Current page number (0-indexed)
	pub page_current: usize,
	/// Total number of rows
	pub total_items: usize,
}

impl Pagination {
	/// Positions a pager over `total_items` rows on the first page
	pub fn new(page_size: NonZeroUsize, total_items: usize) -> Self {
		Self {
			page_size: page_size.get(),
			page_current: 0,
			total_items,
		}
	}

	/// Returns the total number of pages
	pub fn total_pages(&self) -> usize {
		if self.total_items == 0 {
			0
		} else {
			self.total_items.div_ceil(self.page_size)
		}
	}

	/// First row index of the current page
	pub fn start_index(&self) -> usize {
		self.page_current * self.page_size
	}

	/// One past the last row index of the current page
	pub fn end_index(&self) -> usize {
		(self.start_index() + self.page_size).min(self.total_items)
	}

	/// Row index range of the current page
	pub fn range(&self) -> Range<usize> {
		self.start_index().min(self.total_items)..self.end_index()
	}

	/// Returns true if a later page exists
	pub fn has_next(&self) -> bool {
		self.page_current + 1 < self.total_pages()
	}

	/// Returns true if an earlier page exists
	pub fn has_previous(&self) -> bool {
		self.page_current > 0
	}

	/// Sets the current page, clamped to the last page
	pub fn set_page(&mut self, page: usize) {
		self.page_current = page.min(self.total_pages().saturating_sub(1));
	}

	/// Sizes of every page in order
	pub fn page_sizes(&self) -> Vec<usize> {
		(0..self.total_pages())
			.map(|page| {
				let start = page * self.page_size;
				(start + self.page_size).min(self.total_items) - start
			})
			.collect()
	}
}
