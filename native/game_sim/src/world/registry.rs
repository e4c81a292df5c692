//! Path: native/game_sim/src/world/registry.rs
//! Summary: エンティティのマスター登録簿（世代付きスロット・更新順リスト・保留バッファ・二段階破棄）
//!
//! 更新パス中は `order` を構造的に変更しない。パス中に作られたエンティティは
//! `pending` に積まれ、`end_update` で `order` の末尾へ合流する。
//! Destroy 状態のエンティティは `sweep_destroyed` でまとめて削除する。

use super::entity::{Entity, EntityId, EntityKind};

struct Slot {
    generation: u32,
    /// 使用中か。更新のためにチェックアウト中でも true のまま
    occupied:   bool,
    entity:     Option<Entity>,
}

#[derive(Default)]
pub struct EntityRegistry {
    slots:    Vec<Slot>,
    /// 空きスロットのインデックススタック
    free:     Vec<u32>,
    /// 更新順
    order:    Vec<EntityId>,
    /// 更新パス中に作られたもの
    pending:  Vec<EntityId>,
    updating: bool,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録して ID を返す。更新パス中なら保留バッファへ入る。
    pub fn insert(&mut self, mut entity: Entity) -> EntityId {
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.occupied = true;
                EntityId { index, generation: slot.generation }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, occupied: true, entity: None });
                EntityId { index, generation: 0 }
            }
        };
        entity.set_id(id);
        self.slots[id.index as usize].entity = Some(entity);
        if self.updating {
            self.pending.push(id);
        } else {
            self.order.push(id);
        }
        id
    }

    fn slot(&self, id: EntityId) -> Option<&Slot> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.occupied && s.generation == id.generation)
    }

    fn slot_mut(&mut self, id: EntityId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.occupied && s.generation == id.generation)
    }

    /// 生存中の ID か（チェックアウト中も含む）
    pub fn contains(&self, id: EntityId) -> bool {
        self.slot(id).is_some()
    }

    /// 解放済み・チェックアウト中なら None
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slot(id).and_then(|s| s.entity.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slot_mut(id).and_then(|s| s.entity.as_mut())
    }

    /// 更新のためにスロットから取り出す。戻すまで get は None を返す。
    pub(crate) fn checkout(&mut self, id: EntityId) -> Option<Entity> {
        self.slot_mut(id).and_then(|s| s.entity.take())
    }

    pub(crate) fn checkin(&mut self, entity: Entity) {
        let id = entity.id();
        if let Some(slot) = self.slot_mut(id) {
            slot.entity = Some(entity);
        } else {
            debug_assert!(false, "checkin of unknown entity {:?}", id);
        }
    }

    pub(crate) fn begin_update(&mut self) {
        self.updating = true;
    }

    /// 保留バッファを更新順リストへ合流させる
    pub(crate) fn end_update(&mut self) {
        self.updating = false;
        self.order.append(&mut self.pending);
    }

    pub fn is_updating(&self) -> bool {
        self.updating
    }

    /// 更新順での i 番目（更新パス中でも長さは変わらない）
    pub fn order_len(&self) -> usize {
        self.order.len()
    }

    pub fn order_at(&self, i: usize) -> Option<EntityId> {
        self.order.get(i).copied()
    }

    /// 生存エンティティ数（保留中を含む）
    pub fn len(&self) -> usize {
        self.order.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 更新順に並んだエンティティ（保留中は含まない）
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(move |&id| self.get(id))
    }

    /// Destroy 状態のものを削除し、(ID, 種類) を `removed` に積む。
    ///
    /// 1. Destroy のものを列挙する
    /// 2. 更新順リストから外す
    /// 3. スロットを解放する（ここでエンティティとモジュールが drop される）
    ///
    /// 型別リストからの除去は呼び出し側が `removed` を見て行う。
    pub(crate) fn sweep_destroyed(&mut self, removed: &mut Vec<(EntityId, EntityKind)>) {
        debug_assert!(!self.updating, "sweep during update pass");
        let start = removed.len();
        for &id in &self.order {
            if let Some(e) = self.get(id) {
                if e.is_destroyed() {
                    removed.push((id, e.kind()));
                }
            }
        }
        if removed.len() == start {
            return;
        }
        let slots = &self.slots;
        self.order.retain(|id| {
            slots
                .get(id.index as usize)
                .and_then(|s| s.entity.as_ref())
                .map(|e| !e.is_destroyed())
                .unwrap_or(false)
        });
        for &(id, _) in &removed[start..] {
            if let Some(slot) = self.slots.get_mut(id.index as usize) {
                slot.entity = None;
                slot.occupied = false;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
            }
        }
    }

    /// 全エンティティを破棄する（リスタート用）
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.order.clear();
        self.pending.clear();
        self.updating = false;
    }
}
