//! Category Model

use serde::{Deserialize, Serialize};

use super::product::default_true;

/// Category entity (flat list)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub nombre: String,
    /// Parent category reference (ID)
    #[serde(default)]
    pub padre: Option<i64>,
    #[serde(default = "default_true")]
    pub activo: bool,
}

/// Node of the expanded category tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: i64,
    pub nombre: String,
    #[serde(default, alias = "children", alias = "subcategorias")]
    pub hijos: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Depth-first, pre-order walk as `(depth, node)` pairs, roots at 0.
    pub fn flatten(roots: &[CategoryNode]) -> Vec<(usize, &CategoryNode)> {
        fn walk<'a>(nodes: &'a [CategoryNode], depth: usize, out: &mut Vec<(usize, &'a CategoryNode)>) {
            for node in nodes {
                out.push((depth, node));
                walk(&node.hijos, depth + 1, out);
            }
        }

        let mut out = Vec::new();
        walk(roots, 0, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_is_preorder_with_depth() {
        let tree: Vec<CategoryNode> = serde_json::from_str(
            r#"[
                {"id": 1, "nombre": "Ferretería", "hijos": [
                    {"id": 2, "nombre": "Tornillos", "children": []},
                    {"id": 3, "nombre": "Herramientas", "subcategorias": [
                        {"id": 4, "nombre": "Martillos"}
                    ]}
                ]},
                {"id": 5, "nombre": "Pinturas"}
            ]"#,
        )
        .unwrap();

        let flat: Vec<(usize, i64)> = CategoryNode::flatten(&tree)
            .into_iter()
            .map(|(depth, node)| (depth, node.id))
            .collect();
        assert_eq!(flat, vec![(0, 1), (1, 2), (1, 3), (2, 4), (0, 5)]);
    }
}
