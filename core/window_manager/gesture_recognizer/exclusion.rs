// LumosDesktop ジェスチャー除外領域
// アプリがシステムジェスチャーを抑止するために申告した画面領域を保持する

use std::sync::{Arc, RwLock};

use log::debug;
use serde::{Deserialize, Serialize};

/// 整数座標の矩形（右端・下端は含まない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_size(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        !self.is_empty() && x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// 矩形集合による領域
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    rects: Vec<Rect>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rects(rects: impl IntoIterator<Item = Rect>) -> Self {
        Self {
            rects: rects.into_iter().filter(|rect| !rect.is_empty()).collect(),
        }
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        if !rect.is_empty() {
            self.rects.push(rect);
        }
        self
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rects.iter().any(|rect| rect.contains(x, y))
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }
}

/// 除外領域のスナップショット
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExclusionRegions {
    /// ジェスチャーを拒否する領域
    pub excluded: Region,
    /// 制限外として統計に記録する領域。受理の判定には影響しない
    pub unrestricted: Region,
}

impl ExclusionRegions {
    /// `unrestricted` が無ければ `excluded` と同じ領域を使う
    pub fn new(excluded: Region, unrestricted: Option<Region>) -> Self {
        let unrestricted = unrestricted.unwrap_or_else(|| excluded.clone());
        Self {
            excluded,
            unrestricted,
        }
    }

    pub fn is_excluded(&self, x: i32, y: i32) -> bool {
        self.excluded.contains(x, y)
    }

    pub fn is_unrestricted(&self, x: i32, y: i32) -> bool {
        self.unrestricted.contains(x, y)
    }
}

/// 除外領域トラッカー
///
/// ホストのリスナーから非同期に丸ごと差し替えられる。読み手は差し替え前後の
/// どちらか一方のスナップショットを必ず受け取る。
#[derive(Debug, Clone, Default)]
pub struct ExclusionTracker {
    current: Arc<RwLock<Arc<ExclusionRegions>>>,
}

impl ExclusionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在のスナップショット
    pub fn snapshot(&self) -> Arc<ExclusionRegions> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// 領域一式を差し替える
    pub fn replace(&self, excluded: Region, unrestricted: Option<Region>) {
        let regions = Arc::new(ExclusionRegions::new(excluded, unrestricted));
        debug!(
            "除外領域を更新: 除外 {} 件, 制限外 {} 件",
            regions.excluded.rects().len(),
            regions.unrestricted.rects().len()
        );
        match self.current.write() {
            Ok(mut guard) => *guard = regions,
            Err(poisoned) => *poisoned.into_inner() = regions,
        }
    }

    pub fn clear(&self) {
        self.replace(Region::new(), None);
    }
}
