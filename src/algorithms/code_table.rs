use core::fmt;

use crate::algorithms::tree::CodeTreeNode;

/// A prefix code: the root-to-leaf path, `false` for left and `true` for right.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self)
    }
}

/// Maps each byte present in the tree to its code.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes[byte as usize].as_ref()
    }

    /// Entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(byte, code)| code.as_ref().map(|code| (byte as u8, code)))
    }

    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    pub fn max_code_len(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let entries: Vec<_> = self.iter().collect();
        entries.iter().all(|&(x, cx)| {
            entries
                .iter()
                .all(|&(y, cy)| x == y || !(cx.is_prefix_of(cy) || cy.is_prefix_of(cx)))
        })
    }
}

impl fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(byte, code)| (byte, code.to_string())))
            .finish()
    }
}

/// Derives the code of every leaf by walking the tree, `0` on left edges and `1` on right edges.
///
/// A lone-leaf tree gets the one-bit code `0`; an empty path cannot be written to or read from a
/// packed stream.
pub fn generate_codes(tree: &CodeTreeNode) -> CodeTable {
    let mut codes = vec![None; 256];

    if let CodeTreeNode::Leaf { byte, .. } = tree {
        codes[*byte as usize] = Some(Code { bits: vec![false] });
        return CodeTable { codes };
    }

    let mut stack = vec![(tree, Vec::new())];
    while let Some((node, path)) = stack.pop() {
        match node {
            CodeTreeNode::Leaf { byte, .. } => codes[*byte as usize] = Some(Code { bits: path }),
            CodeTreeNode::Internal { left, right, .. } => {
                let mut right_path = path.clone();
                right_path.push(true);
                stack.push((right.as_ref(), right_path));

                let mut left_path = path;
                left_path.push(false);
                stack.push((left.as_ref(), left_path));
            }
        }
    }

    CodeTable { codes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::frequency::FrequencyModel;
    use crate::algorithms::tree::build_tree;

    fn table_of(input: &[u8]) -> CodeTable {
        generate_codes(&build_tree(&FrequencyModel::compute(input)).unwrap())
    }

    #[test]
    fn every_input_byte_has_a_code() {
        let input = b"this is an example for huffman encoding";
        let table = table_of(input);
        for &byte in input {
            assert!(table.get(byte).is_some(), "missing code for {:?}", byte as char);
        }
        assert_eq!(table.len(), FrequencyModel::compute(input).len());
        assert_eq!(table.get(b'z'), None);
    }

    #[test]
    fn codes_follow_left_zero_right_one() {
        // a:1 b:1 c:2 -> c on the left, (a, b) on the right
        let table = table_of(b"abcc");
        assert_eq!(table.get(b'c').unwrap().to_string(), "0");
        assert_eq!(table.get(b'a').unwrap().to_string(), "10");
        assert_eq!(table.get(b'b').unwrap().to_string(), "11");
    }

    #[test]
    fn lone_leaf_gets_a_one_bit_code() {
        let table = table_of(&[0x41; 1000]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0x41).unwrap().bits(), &[false]);
    }

    #[test]
    fn codes_are_prefix_free() {
        let skewed: Vec<u8> = (0..=255u8).flat_map(|b| vec![b; 1 + (b as usize * 13) % 97]).collect();
        let table = table_of(&skewed);
        assert_eq!(table.len(), 256);
        assert!(table.is_prefix_free());

        for (x, cx) in table.iter() {
            for (y, cy) in table.iter() {
                if x != y {
                    assert!(!cx.is_prefix_of(cy), "{:?} is a prefix of {:?}", cx, cy);
                }
            }
        }
    }

    #[test]
    fn frequent_bytes_get_shorter_codes() {
        let mut input = vec![b'e'; 500];
        input.extend_from_slice(b"xyzq");
        let table = table_of(&input);
        let short = table.get(b'e').unwrap().len();
        assert!(table.iter().all(|(_, code)| code.len() >= short));
        assert_eq!(short, 1);
    }

    #[test]
    fn deep_tree_produces_long_codes() {
        let weights = [1usize, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144];
        let input: Vec<u8> = weights.iter().enumerate().flat_map(|(i, &w)| vec![i as u8; w]).collect();
        let table = table_of(&input);
        assert_eq!(table.max_code_len(), weights.len() - 1);
        assert!(table.is_prefix_free());
    }
}
