use serde::Serialize;

pub(crate) const POSTS_PER_PAGE: u32 = 10;

/// Page number as requested in `?page=`, before the total is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum PageRequest {
    #[default]
    First,
    Number(u32),
    Last,
}

impl PageRequest {
    /// Unparsable input falls back to the first page instead of failing the request.
    pub(crate) fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::First,
            Some("last") => Self::Last,
            Some(value) => match value.parse::<u32>() {
                Ok(0) | Err(_) => Self::First,
                Ok(number) => Self::Number(number),
            },
        }
    }

    /// Clamps into `1..=num_pages`.
    pub(crate) fn resolve(self, num_pages: u32) -> u32 {
        match self {
            Self::First => 1,
            Self::Number(number) => number.min(num_pages).max(1),
            Self::Last => num_pages.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pagination {
    pub(crate) page: u32,
    pub(crate) page_size: u32,
}

impl Pagination {
    pub(crate) fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub(crate) fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.page_size)
    }
}

/// Empty result sets still have one (empty) page.
pub(crate) fn num_pages(total: i64, page_size: u32) -> u32 {
    if total <= 0 || page_size == 0 {
        return 1;
    }
    let pages = (total + i64::from(page_size) - 1) / i64::from(page_size);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Page<T> {
    pub(crate) items: Vec<T>,
    pub(crate) page: u32,
    pub(crate) page_size: u32,
    pub(crate) total: i64,
    pub(crate) num_pages: u32,
}

impl<T> Page<T> {
    pub(crate) fn has_next(&self) -> bool {
        self.page < self.num_pages
    }

    pub(crate) fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub(crate) fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            num_pages: self.num_pages,
        }
    }
}
