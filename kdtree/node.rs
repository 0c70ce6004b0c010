use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point2D, RectHV};

/// 分割线方向
///
/// 深度为偶数的节点用竖线分割（按 x 比较），奇数深度用横线分割（按 y 比较）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// 子节点所在的一侧
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// 分割线的左侧或下侧
    LeftBottom,
    /// 分割线的右侧或上侧
    RightTop,
}

impl Orientation {
    /// 下一层的方向
    pub fn next(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }

    /// 按当前轴比较两个点：竖线用 x 优先序，横线用 y 优先序
    pub fn compare(self, a: &Point2D, b: &Point2D) -> Ordering {
        match self {
            Orientation::Vertical => Point2D::x_order(a, b),
            Orientation::Horizontal => Point2D::y_order(a, b),
        }
    }

    /// 判断 `p` 相对于节点点 `at` 落在哪一侧
    ///
    /// 只有比较结果严格小于时才走左/下，其余（包括分割坐标相同）都走右/上。
    pub fn side_of(self, p: &Point2D, at: &Point2D) -> Side {
        if self.compare(p, at) == Ordering::Less {
            Side::LeftBottom
        } else {
            Side::RightTop
        }
    }
}

/// kd-tree 节点
///
/// 节点创建后点和矩形都不再变化，只有子节点链接会被写入一次。
#[derive(Debug)]
pub struct Node {
    /// 节点存储的点
    pub point: Point2D,
    /// 整棵子树所在的矩形区域
    pub rect: RectHV,
    /// 左/下子树
    pub left: Option<Box<Node>>,
    /// 右/上子树
    pub right: Option<Box<Node>>,
}

impl Node {
    pub fn new(point: Point2D, rect: RectHV) -> Self {
        Node {
            point,
            rect,
            left: None,
            right: None,
        }
    }

    /// 根节点，矩形就是整个 universe
    pub fn root(point: Point2D, universe: RectHV) -> Self {
        Self::new(point, universe)
    }

    /// 推导某一侧子节点的矩形：在本节点的坐标处把矩形沿分割轴截断
    pub fn child_rect(&self, orientation: Orientation, side: Side) -> RectHV {
        match (orientation, side) {
            (Orientation::Vertical, Side::LeftBottom) => self.rect.with_xmax(self.point.x()),
            (Orientation::Vertical, Side::RightTop) => self.rect.with_xmin(self.point.x()),
            (Orientation::Horizontal, Side::LeftBottom) => self.rect.with_ymax(self.point.y()),
            (Orientation::Horizontal, Side::RightTop) => self.rect.with_ymin(self.point.y()),
        }
    }

    pub fn child(&self, side: Side) -> Option<&Node> {
        match side {
            Side::LeftBottom => self.left.as_deref(),
            Side::RightTop => self.right.as_deref(),
        }
    }

    pub fn child_slot_mut(&mut self, side: Side) -> &mut Option<Box<Node>> {
        match side {
            Side::LeftBottom => &mut self.left,
            Side::RightTop => &mut self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
