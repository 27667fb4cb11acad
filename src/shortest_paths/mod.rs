//! C10: the shortest-path family.

pub mod astar;
pub mod bellman_ford;
pub mod dag;
pub mod dijkstra;
pub mod floyd_warshall;
