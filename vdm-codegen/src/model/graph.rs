//! The complex type property graph.

use std::collections::HashMap;

use indexmap::IndexMap;
use vdmgen_edmx::{RawComplexType, RawSchema, TypeReference};

use super::SemanticModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Complex types indexed by qualified name, with an edge for every property
/// typed with another complex type.
#[derive(Debug)]
pub struct ComplexTypeGraph<'a> {
    nodes: IndexMap<String, &'a RawComplexType>,
    edges: IndexMap<String, Vec<String>>,
}

impl<'a> ComplexTypeGraph<'a> {
    pub fn new(raw: &'a RawSchema) -> Self {
        let nodes: IndexMap<String, &RawComplexType> = raw
            .complex_types
            .iter()
            .map(|complex| (complex.qualified_name(), complex))
            .collect();

        let edges: IndexMap<String, Vec<String>> = nodes
            .iter()
            .map(|(name, complex)| {
                let targets: Vec<String> = complex
                    .properties
                    .iter()
                    .filter_map(|p| TypeReference::parse(&p.type_name).ok()?.qualified_name())
                    .filter(|target| nodes.contains_key(target))
                    .collect();
                (name.clone(), targets)
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn get(&self, qualified_name: &str) -> Option<&'a RawComplexType> {
        self.nodes.get(qualified_name).copied()
    }

    /// Complex types directly used by `qualified_name`, in declaration order.
    pub fn dependencies(&self, qualified_name: &str) -> &[String] {
        self.edges
            .get(qualified_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Qualified names such that every complex type comes after the complex
    /// types its properties use. Ties follow declaration order.
    ///
    /// Fails with [`SemanticModelError::ComplexTypeCycle`] if a complex type
    /// contains itself at any depth.
    pub fn post_order(&self) -> Result<Vec<&str>, SemanticModelError> {
        let mut marks: HashMap<&str, Mark> = HashMap::new();
        let mut order = Vec::with_capacity(self.nodes.len());

        for root in self.nodes.keys() {
            if marks.contains_key(root.as_str()) {
                continue;
            }
            marks.insert(root, Mark::Visiting);
            let mut stack: Vec<(&str, usize)> = vec![(root.as_str(), 0)];

            while let Some(top) = stack.last_mut() {
                let (node, next) = *top;
                let Some(child) = self.dependencies(node).get(next) else {
                    marks.insert(node, Mark::Done);
                    order.push(node);
                    stack.pop();
                    continue;
                };
                top.1 += 1;

                match marks.get(child.as_str()) {
                    Some(Mark::Done) => {}
                    Some(Mark::Visiting) => {
                        let start = stack
                            .iter()
                            .position(|(n, _)| *n == child.as_str())
                            .unwrap_or_default();
                        let mut cycle: Vec<String> =
                            stack[start..].iter().map(|(n, _)| n.to_string()).collect();
                        cycle.push(child.clone());
                        return Err(SemanticModelError::ComplexTypeCycle { cycle });
                    }
                    None => {
                        marks.insert(child, Mark::Visiting);
                        stack.push((child.as_str(), 0));
                    }
                }
            }
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use vdmgen_edmx::parse_str;

    use super::*;

    fn schema(complex_types: &str) -> RawSchema {
        let xml = format!(
            r#"<edmx:Edmx Version="1.0" xmlns:edmx="http://schemas.microsoft.com/ado/2007/06/edmx">
  <edmx:DataServices>
    <Schema Namespace="NS" xmlns="http://schemas.microsoft.com/ado/2008/09/edm">
{}
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#,
            complex_types
        );
        parse_str(&xml, "graph.edmx").unwrap()
    }

    #[test]
    fn test_post_order_puts_dependencies_first() {
        let raw = schema(
            r#"
      <ComplexType Name="Meal">
        <Property Name="Desert" Type="NS.Desert"/>
        <Property Name="Amount" Type="Edm.Int16"/>
      </ComplexType>
      <ComplexType Name="Desert">
        <Property Name="Topping" Type="NS.Topping"/>
      </ComplexType>
      <ComplexType Name="Topping">
        <Property Name="Name" Type="Edm.String"/>
      </ComplexType>"#,
        );
        let graph = ComplexTypeGraph::new(&raw);

        assert_eq!(graph.dependencies("NS.Meal"), ["NS.Desert".to_string()]);
        assert_eq!(
            graph.post_order().unwrap(),
            vec!["NS.Topping", "NS.Desert", "NS.Meal"]
        );
    }

    #[test]
    fn test_independent_types_keep_declaration_order() {
        let raw = schema(
            r#"
      <ComplexType Name="B"><Property Name="X" Type="Edm.String"/></ComplexType>
      <ComplexType Name="A"><Property Name="X" Type="Edm.String"/></ComplexType>"#,
        );
        assert_eq!(
            ComplexTypeGraph::new(&raw).post_order().unwrap(),
            vec!["NS.B", "NS.A"]
        );
    }

    #[test]
    fn test_direct_cycle_is_rejected() {
        let raw = schema(
            r#"
      <ComplexType Name="Node">
        <Property Name="Next" Type="NS.Node"/>
      </ComplexType>"#,
        );
        let err = ComplexTypeGraph::new(&raw).post_order().unwrap_err();
        assert_eq!(
            err,
            SemanticModelError::ComplexTypeCycle {
                cycle: vec!["NS.Node".to_string(), "NS.Node".to_string()]
            }
        );
    }

    #[test]
    fn test_transitive_cycle_is_rejected() {
        let raw = schema(
            r#"
      <ComplexType Name="Root"><Property Name="A" Type="NS.A"/></ComplexType>
      <ComplexType Name="A"><Property Name="B" Type="NS.B"/></ComplexType>
      <ComplexType Name="B"><Property Name="A" Type="NS.A"/></ComplexType>"#,
        );
        let err = ComplexTypeGraph::new(&raw).post_order().unwrap_err();
        assert_eq!(
            err.to_string(),
            "complex types contain themselves: NS.A -> NS.B -> NS.A"
        );
    }
}
