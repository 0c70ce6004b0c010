// kd-tree 算法模块
//
// - insert: 插入，沿途推导子节点矩形
// - search: 成员判断和矩形范围查询
// - nearest: 最近邻查询
// - traversal: 先序遍历分割信息，供绘图和导出使用

pub mod insert;
pub mod nearest;
pub mod search;
pub mod traversal;
