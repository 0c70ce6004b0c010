use tracing::{debug, trace};

use super::super::kdtree::KdTree;
use super::super::node::{Node, Orientation};
use crate::error::{KdError, KdResult};
use crate::geometry::Point2D;

/// 插入操作相关算法
impl KdTree {
    /// 插入一个点，点已存在时什么都不做
    ///
    /// 返回是否真的新增了节点。点不在 universe 内时返回 `OutsideUniverse`。
    pub fn insert(&mut self, p: Point2D) -> KdResult<bool> {
        let universe = *self.universe();
        if !universe.contains(&p) {
            debug!(point = %p, %universe, "rejecting point outside universe");
            return Err(KdError::OutsideUniverse { point: p, universe });
        }

        let mut slot = self.root_slot_mut();
        let mut rect = universe;
        let mut orientation = Orientation::Vertical;
        let mut depth = 0usize;

        // 沿比较结果向下走，直到遇到空槽位或相同的点
        while let Some(node) = slot {
            if node.point == p {
                return Ok(false);
            }
            let side = orientation.side_of(&p, &node.point);
            rect = node.child_rect(orientation, side);
            slot = node.child_slot_mut(side);
            orientation = orientation.next();
            depth += 1;
        }

        trace!(point = %p, depth, "allocating node");
        let node = if depth == 0 {
            Node::root(p, universe)
        } else {
            Node::new(p, rect)
        };
        *slot = Some(Box::new(node));
        self.increment_size();
        Ok(true)
    }

}
