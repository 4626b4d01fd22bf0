//! ノードストア
//!
//! 指紋（u64）→ `Node` の写像。既定実装は `RamStore`（シャード分割した `RwLock<HashMap>`）。
//! 複数キーにまたがるトランザクションは提供しない。

use std::collections::HashMap;

use parking_lot::RwLock;

use super::node::Node;

/// ノードストアの境界
///
/// コールバック実行中にストアを再入してはならない（`missing` はロック解放後に呼ばれる）。
pub trait NodeStore: Send + Sync {
    /// キーがあれば `found`、なければ `missing` を呼ぶ
    fn load<R>(
        &self,
        key: u64,
        found: impl FnOnce(&mut Node) -> R,
        missing: impl FnOnce(u64) -> R,
    ) -> R;

    /// 無条件に上書き保存
    fn store(&self, key: u64, node: Node);

    /// 全エントリを走査（順序は不定）
    fn each(&self, visitor: impl FnMut(u64, &Node));

    /// 全エントリを削除
    fn clear(&self);

    /// エントリ数
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// キーがあるときだけ `found` を呼ぶ
    #[inline]
    fn load_safe(&self, key: u64, found: impl FnOnce(&mut Node)) {
        self.load(key, found, |_| ());
    }

    /// ノードの複製を取得
    #[inline]
    fn get(&self, key: u64) -> Option<Node> {
        self.load(key, |node| Some(node.clone()), |_| None)
    }
}

/// 既定のシャード数
pub const DEFAULT_SHARDS: usize = 16;

/// メモリ上のノードストア
pub struct RamStore {
    shards: Box<[RwLock<HashMap<u64, Node>>]>,
}

impl RamStore {
    /// `shards` を 2 の冪に切り上げて作成
    pub fn new(shards: usize) -> Self {
        let num = shards.max(1).next_power_of_two();
        let shards = (0..num).map(|_| RwLock::new(HashMap::new())).collect();
        Self { shards }
    }

    /// シャード数
    #[inline]
    pub fn num_shards(&self) -> usize {
        self.shards.len()
    }

    #[inline(always)]
    fn shard(&self, key: u64) -> &RwLock<HashMap<u64, Node>> {
        debug_assert!(self.shards.len().is_power_of_two());
        // 下位ビットでシャードを選ぶ
        &self.shards[(key as usize) & (self.shards.len() - 1)]
    }
}

impl Default for RamStore {
    fn default() -> Self {
        Self::new(DEFAULT_SHARDS)
    }
}

impl NodeStore for RamStore {
    fn load<R>(
        &self,
        key: u64,
        found: impl FnOnce(&mut Node) -> R,
        missing: impl FnOnce(u64) -> R,
    ) -> R {
        let mut shard = self.shard(key).write();
        if let Some(node) = shard.get_mut(&key) {
            return found(node);
        }
        drop(shard);
        missing(key)
    }

    fn store(&self, key: u64, node: Node) {
        self.shard(key).write().insert(key, node);
    }

    fn each(&self, mut visitor: impl FnMut(u64, &Node)) {
        for shard in self.shards.iter() {
            for (&key, node) in shard.read().iter() {
                visitor(key, node);
            }
        }
    }

    fn clear(&self) {
        for shard in self.shards.iter() {
            shard.write().clear();
        }
    }

    fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }
}
