//! Movable vertices extracted from parsed paths.
//!
//! A [`Vertex`] carries [`CoordinateSlot`]s pointing back into the
//! [`PathModel`] it came from. Slots are plain index triples resolved
//! against the path arena, so the arena stays the single owner of the
//! geometry.

use kurbo::Point;

use crate::path::{CommandKind, PathModel};

/// One writable operand inside a path: `paths[path].commands[command].operands[operand]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateSlot {
    pub path: usize,
    pub command: usize,
    pub operand: usize,
}

impl CoordinateSlot {
    pub fn read(&self, paths: &[PathModel]) -> Option<f64> {
        paths.get(self.path)?.operand(self.command, self.operand)
    }

    pub fn write(&self, paths: &mut [PathModel], value: f64) -> bool {
        paths
            .get_mut(self.path)
            .is_some_and(|p| p.set_operand(self.command, self.operand, value))
    }
}

/// Terminal point of a drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Dense id, assigned in (path, command) order.
    pub id: usize,
    /// Index of the owning path.
    pub path: usize,
    pub position: Point,
    /// Absent for `V`, whose x is implied by the previous point.
    pub x_slot: Option<CoordinateSlot>,
    /// Absent for `H`, whose y is implied by the previous point.
    pub y_slot: Option<CoordinateSlot>,
}

/// All vertices of one alignment run.
#[derive(Debug, Clone, Default)]
pub struct VertexSet {
    vertices: Vec<Vertex>,
    path_count: usize,
}

impl VertexSet {
    /// Walk every path and collect one vertex per non-close command.
    ///
    /// Empty paths contribute no vertices but keep their index, so path
    /// numbering matches the input order.
    pub fn extract(paths: &[PathModel]) -> Self {
        let mut vertices = Vec::new();
        let mut owners = 0;

        for (path_idx, path) in paths.iter().enumerate() {
            let before = vertices.len();
            let mut current = Point::ZERO;
            let mut start = Point::ZERO;

            for (cmd_idx, command) in path.commands().iter().enumerate() {
                if command.kind() == CommandKind::Close {
                    current = start;
                    continue;
                }
                let (xi, yi) = command.kind().endpoint_operands();
                let position = command.end_point(current);
                // Slots only for operands the command really carries.
                let xi = xi.filter(|&i| i < command.operands().len());
                let yi = yi.filter(|&i| i < command.operands().len());
                let slot = |operand| CoordinateSlot {
                    path: path_idx,
                    command: cmd_idx,
                    operand,
                };
                vertices.push(Vertex {
                    id: vertices.len(),
                    path: path_idx,
                    position,
                    x_slot: xi.map(slot),
                    y_slot: yi.map(slot),
                });

                current = position;
                if command.kind() == CommandKind::Move {
                    start = position;
                }
            }

            if vertices.len() > before {
                owners += 1;
            }
        }

        Self {
            vertices,
            path_count: owners,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of distinct paths that own at least one vertex.
    pub fn path_count(&self) -> usize {
        self.path_count
    }

    pub fn get(&self, id: usize) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Move a vertex, writing through whichever slots it has.
    ///
    /// The in-memory position is always updated. An axis without a slot
    /// is not written back to the path: the implied coordinate of an `H`
    /// or `V` command belongs to the previous command.
    pub fn set_position(&mut self, id: usize, paths: &mut [PathModel], to: Point) {
        let Some(v) = self.vertices.get_mut(id) else {
            return;
        };
        if let Some(slot) = v.x_slot {
            slot.write(paths, to.x);
        }
        if let Some(slot) = v.y_slot {
            slot.write(paths, to.y);
        }
        v.position = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(data: &[&str]) -> Vec<PathModel> {
        data.iter().map(|d| PathModel::parse(d).unwrap()).collect()
    }

    #[test]
    fn ids_follow_path_then_command_order() {
        let paths = parse_all(&["M0,0 L1,0 Z", "M5,5 L6,6"]);
        let set = VertexSet::extract(&paths);
        let got: Vec<(usize, usize, Point)> =
            set.iter().map(|v| (v.id, v.path, v.position)).collect();
        assert_eq!(
            got,
            vec![
                (0, 0, Point::new(0.0, 0.0)),
                (1, 0, Point::new(1.0, 0.0)),
                (2, 1, Point::new(5.0, 5.0)),
                (3, 1, Point::new(6.0, 6.0)),
            ]
        );
        assert_eq!(set.path_count(), 2);
    }

    #[test]
    fn curves_contribute_only_endpoints() {
        let paths = parse_all(&["M0,0 C1,1 2,2 3,3 Q4,4 5,5 A1,1 0 0,1 6,6"]);
        let set = VertexSet::extract(&paths);
        let pts: Vec<Point> = set.iter().map(|v| v.position).collect();
        assert_eq!(
            pts,
            vec![
                Point::new(0.0, 0.0),
                Point::new(3.0, 3.0),
                Point::new(5.0, 5.0),
                Point::new(6.0, 6.0),
            ]
        );
        let curve = set.get(1).unwrap();
        assert_eq!(curve.x_slot.unwrap().operand, 4);
        assert_eq!(curve.y_slot.unwrap().operand, 5);
    }

    #[test]
    fn axis_commands_synthesize_missing_coordinate() {
        let paths = parse_all(&["M1,2 H8 V9"]);
        let set = VertexSet::extract(&paths);
        let h = set.get(1).unwrap();
        assert_eq!(h.position, Point::new(8.0, 2.0));
        assert!(h.x_slot.is_some() && h.y_slot.is_none());
        let v = set.get(2).unwrap();
        assert_eq!(v.position, Point::new(8.0, 9.0));
        assert!(v.x_slot.is_none() && v.y_slot.is_some());
    }

    #[test]
    fn close_resets_current_point() {
        let paths = parse_all(&["M1,1 L5,1 Z H3"]);
        let set = VertexSet::extract(&paths);
        assert_eq!(set.get(2).unwrap().position, Point::new(3.0, 1.0));
    }

    #[test]
    fn set_position_writes_through_slots() {
        let mut paths = parse_all(&["M0,0 L10,0", "M1,1 H4"]);
        let mut set = VertexSet::extract(&paths);

        set.set_position(1, &mut paths, Point::new(10.1, 0.5));
        assert_eq!(paths[0].operand(1, 0), Some(10.1));
        assert_eq!(paths[0].operand(1, 1), Some(0.5));
        assert!(paths[0].is_dirty());

        // H has no y slot: only x reaches the path.
        set.set_position(3, &mut paths, Point::new(4.5, 7.0));
        assert_eq!(paths[1].commands()[1].operands(), &[4.5]);
        assert_eq!(set.get(3).unwrap().position, Point::new(4.5, 7.0));
    }

    #[test]
    fn slot_reads_live_value() {
        let mut paths = parse_all(&["M0,0 L2,3"]);
        let set = VertexSet::extract(&paths);
        let slot = set.get(1).unwrap().y_slot.unwrap();
        assert_eq!(slot.read(&paths), Some(3.0));
        slot.write(&mut paths, 4.0);
        assert_eq!(slot.read(&paths), Some(4.0));
    }

    #[test]
    fn empty_paths_are_not_counted() {
        let paths = parse_all(&["", "M0,0"]);
        let set = VertexSet::extract(&paths);
        assert_eq!(set.len(), 1);
        assert_eq!(set.path_count(), 1);
        assert_eq!(set.get(0).unwrap().path, 1);
    }
}
