//! Serializable snapshot of laid-out pages for the host

use crate::document::{BlockNode, TocEntry};
use crate::layout::Pagination;
use serde::Serialize;

/// Display representation of one page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<'a> {
    pub page_index: usize,
    pub blocks: &'a [BlockNode],
}

/// Table of contents entry resolved to its page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TocView {
    #[serde(flatten)]
    pub entry: TocEntry,
    /// 0-based page, `None` only when the pager is detached
    pub page: Option<usize>,
}

/// Complete display list for rendering
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayList<'a> {
    pub version: u64,
    pub pages: Vec<PageView<'a>>,
}

impl<'a> DisplayList<'a> {
    /// Build display list from a layout pass
    pub fn build(pagination: &'a Pagination, version: u64) -> Self {
        let pages = pagination
            .pages()
            .iter()
            .map(|page| PageView {
                page_index: page.index,
                blocks: &page.nodes,
            })
            .collect();
        Self { version, pages }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::warn!("failed to serialize display list: {}", e);
            String::from("{\"version\":0,\"pages\":[]}")
        })
    }
}
