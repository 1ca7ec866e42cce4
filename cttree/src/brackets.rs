//! Reading bracketed (Penn Treebank style) trees.

use std::io;
use std::str::FromStr;

use crate::error::ReadError;
use crate::node::NodeId;
use crate::tag::{CTag, FTag};
use crate::tree::CTTree;

/// A trait for objects that can read bracketed `CTTree`s.
pub trait ReadTree {
    /// Read a tree from this object.
    ///
    /// Returns `None` when the reader is exhausted.
    fn read_tree(&mut self) -> Result<Option<CTTree>, ReadError>;

    /// Get an iterator over the trees in this reader.
    fn trees(self) -> Trees<Self>
    where
        Self: Sized,
    {
        Trees { reader: self }
    }
}

/// A reader for bracketed trees.
///
/// One tree spans one or more lines; a tree ends where its brackets
/// balance out. Blank lines between trees are skipped.
pub struct Reader<R> {
    read: R,
}

impl<R: io::BufRead> Reader<R> {
    pub fn new(read: R) -> Reader<R> {
        Reader { read }
    }
}

impl<R: io::BufRead> ReadTree for Reader<R> {
    fn read_tree(&mut self) -> Result<Option<CTTree>, ReadError> {
        let mut buf = String::new();
        let mut line = String::new();
        let mut depth = 0i64;
        let mut seen = false;

        loop {
            line.clear();

            if self.read.read_line(&mut line)? == 0 {
                if !seen {
                    return Ok(None);
                }

                if depth != 0 {
                    return Err(ReadError::Unbalanced { value: buf });
                }

                return parse_tree(&buf).map(Some);
            }

            if !seen && line.trim().is_empty() {
                continue;
            }

            for ch in line.chars() {
                match ch {
                    '(' => {
                        depth += 1;
                        seen = true;
                    }
                    ')' => depth -= 1,
                    _ => (),
                }
            }

            buf.push_str(&line);

            if depth < 0 {
                return Err(ReadError::Unbalanced { value: buf });
            }

            if seen && depth == 0 {
                return parse_tree(&buf).map(Some);
            }
        }
    }
}

impl<R: io::BufRead> IntoIterator for Reader<R> {
    type Item = Result<CTTree, ReadError>;
    type IntoIter = Trees<Reader<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees()
    }
}

/// Iterator over the trees in a reader.
pub struct Trees<R>
where
    R: ReadTree,
{
    reader: R,
}

impl<R> Iterator for Trees<R>
where
    R: ReadTree,
{
    type Item = Result<CTTree, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_tree().transpose()
    }
}

/// Parse a single bracketed tree.
///
/// A missing label on the outermost brackets, as in `( (S ...))`, stands
/// for the `TOP` node.
pub fn parse_tree(value: &str) -> Result<CTTree, ReadError> {
    let tokens = tokenize(value);
    let mut parser = Parser { tokens, pos: 0 };
    parser.parse()
}

impl FromStr for CTTree {
    type Err = ReadError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_tree(value)
    }
}

/// Revert bracket escapes in a word form (`-LRB-` to `(`, etc.).
pub fn revert_brackets(form: &str) -> String {
    match form {
        "-LRB-" => "(".to_owned(),
        "-RRB-" => ")".to_owned(),
        "-LSB-" => "[".to_owned(),
        "-RSB-" => "]".to_owned(),
        "-LCB-" => "{".to_owned(),
        "-RCB-" => "}".to_owned(),
        _ => form.to_owned(),
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token<'a> {
    Open,
    Close,
    Atom(&'a str),
}

fn tokenize(value: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (idx, ch) in value.char_indices() {
        if ch == '(' || ch == ')' || ch.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token::Atom(&value[s..idx]));
            }

            if ch == '(' {
                tokens.push(Token::Open);
            } else if ch == ')' {
                tokens.push(Token::Close);
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }

    if let Some(s) = start {
        tokens.push(Token::Atom(&value[s..]));
    }

    tokens
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self) -> ReadError {
        let value = match self.peek() {
            Some(Token::Open) => "(".to_owned(),
            Some(Token::Close) => ")".to_owned(),
            Some(Token::Atom(atom)) => atom.to_owned(),
            None => "end of input".to_owned(),
        };

        ReadError::UnexpectedToken { value }
    }

    fn parse(&mut self) -> Result<CTTree, ReadError> {
        match self.advance() {
            Some(Token::Open) => (),
            None => return Err(ReadError::Empty),
            _ => return Err(self.unexpected()),
        }

        let mut tree = match self.peek() {
            Some(Token::Atom(label)) => {
                self.advance();
                let (tag, ftags, co, gap) = parse_label(label);
                let mut tree = CTTree::with_root(tag);
                let root = tree.root();
                tree[root].add_ftags(ftags);
                tree[root].set_co_index(co);
                tree[root].set_gap_index(gap);
                tree
            }
            Some(Token::Open) => CTTree::with_root(CTag::Top),
            _ => return Err(self.unexpected()),
        };

        let root = tree.root();

        loop {
            match self.peek() {
                Some(Token::Close) => {
                    self.advance();
                    break;
                }
                Some(Token::Open) => self.parse_node(&mut tree, root)?,
                _ => return Err(self.unexpected()),
            }
        }

        if self.peek().is_some() {
            return Err(self.unexpected());
        }

        if tree.children(root).is_empty() {
            return Err(ReadError::Empty);
        }

        tree.seal();

        Ok(tree)
    }

    fn parse_node(&mut self, tree: &mut CTTree, parent: NodeId) -> Result<(), ReadError> {
        match self.advance() {
            Some(Token::Open) => (),
            _ => return Err(self.unexpected()),
        }

        let label = match self.advance() {
            Some(Token::Atom(label)) => label,
            _ => return Err(self.unexpected()),
        };

        let (tag, ftags, co, gap) = parse_label(label);

        match self.peek() {
            Some(Token::Atom(form)) => {
                // A word form makes this node a terminal.
                let form = form.to_owned();
                self.advance();

                let id = tree.add_terminal(parent, tag, form);
                tree[id].add_ftags(ftags);
                tree[id].set_co_index(co);
                tree[id].set_gap_index(gap);

                match self.peek() {
                    Some(Token::Close) => {
                        self.advance();
                        Ok(())
                    }
                    _ => Err(self.unexpected()),
                }
            }
            _ => {
                let id = tree.add_phrase(parent, tag);
                tree[id].add_ftags(ftags);
                tree[id].set_co_index(co);
                tree[id].set_gap_index(gap);

                loop {
                    match self.peek() {
                        Some(Token::Close) => {
                            self.advance();
                            return Ok(());
                        }
                        Some(Token::Open) => self.parse_node(tree, id)?,
                        _ => return Err(self.unexpected()),
                    }
                }
            }
        }
    }
}

/// Split a node label into its constituent tag, function tags, co-index
/// and gapping index.
///
/// Labels with a leading hyphen (`-NONE-`, `-LRB-`) are a bare tag.
/// Unknown function tags are skipped.
fn parse_label(label: &str) -> (CTag, Vec<FTag>, Option<usize>, Option<usize>) {
    if label.starts_with('-') {
        return (CTag::parse(label), Vec::new(), None, None);
    }

    let tag_end = label
        .find(|c| c == '-' || c == '=')
        .unwrap_or_else(|| label.len());
    let tag = CTag::parse(&label[..tag_end]);

    let mut ftags = Vec::new();
    let mut co_index = None;
    let mut gap_index = None;
    let mut rest = &label[tag_end..];

    while !rest.is_empty() {
        let sep = rest.chars().next().expect("non-empty label remainder");
        rest = &rest[sep.len_utf8()..];
        let end = rest
            .find(|c| c == '-' || c == '=')
            .unwrap_or_else(|| rest.len());
        let segment = &rest[..end];
        rest = &rest[end..];

        match sep {
            '=' => {
                if let Ok(index) = segment.parse() {
                    gap_index = Some(index);
                }
            }
            _ => {
                if let Ok(index) = segment.parse() {
                    co_index = Some(index);
                } else if let Some(ftag) = FTag::parse(segment) {
                    ftags.push(ftag);
                }
            }
        }
    }

    (tag, ftags, co_index, gap_index)
}

#[cfg(test)]
mod tests {
    use std::io::BufReader;

    use super::{parse_tree, revert_brackets, ReadTree, Reader};
    use crate::error::ReadError;
    use crate::tag::{CTag, FTag};
    use crate::tree::CTTree;

    #[test]
    fn parse_simple() {
        let tree: CTTree = "(TOP (S (NP-SBJ (NNP John)) (VP (VBD saw) (NP (NNP Mary)))))"
            .parse()
            .unwrap();

        assert_eq!(tree[tree.root()].tag(), CTag::Top);
        assert_eq!(tree.tokens().len(), 3);
        let s = tree.children(tree.root())[0];
        let np = tree.children(s)[0];
        assert!(tree[np].has_ftag(FTag::Sbj));
        assert_eq!(tree[tree.token(1)].form(), Some("saw"));
    }

    #[test]
    fn implicit_top() {
        let tree: CTTree = "( (S (NP (PRP It)) (VP (VBZ works))))".parse().unwrap();
        assert_eq!(tree[tree.root()].tag(), CTag::Top);
        assert_eq!(tree.tokens().len(), 2);
    }

    #[test]
    fn label_indices() {
        let tree: CTTree = "(TOP (S (NP-SBJ-1 (NNP John)) (VP=2 (VBD left)) (NP-LOC (NN home))))"
            .parse()
            .unwrap();

        let s = tree.children(tree.root())[0];
        let np = tree.children(s)[0];
        let vp = tree.children(s)[1];
        let loc = tree.children(s)[2];

        assert_eq!(tree[np].co_index(), Some(1));
        assert!(tree[np].has_ftag(FTag::Sbj));
        assert_eq!(tree[vp].gap_index(), Some(2));
        assert!(tree[loc].has_ftag(FTag::Loc));
        assert_eq!(tree.co_indexed(1), Some(np));
    }

    #[test]
    fn empty_categories() {
        let tree: CTTree = "(TOP (NP (NP (NN book)) (SBAR (WHNP-1 (WDT that)) \
                            (S (NP-SBJ (PRP I)) (VP (VBD bought) (NP (-NONE- *T*-1)))))))"
            .parse()
            .unwrap();

        assert_eq!(tree.tokens().len(), 4);
        assert_eq!(tree.terminals().len(), 5);

        let group = tree.ec_group(1);
        assert_eq!(group.len(), 1);
        let trace = group[0];
        assert!(tree[trace].is_empty_category());
        assert_eq!(tree[trace].antecedent(), tree.co_indexed(1));
    }

    #[test]
    fn reader_multiple_trees() {
        let data = "(TOP (NP (NN cat)))\n\n( (NP (NN dog)\n    (NN house)))\n";
        let reader = Reader::new(BufReader::new(data.as_bytes()));
        let trees: Result<Vec<_>, _> = reader.trees().collect();
        let trees = trees.unwrap();

        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].tokens().len(), 1);
        assert_eq!(trees[1].tokens().len(), 2);
    }

    #[test]
    fn unbalanced() {
        let reader = Reader::new(BufReader::new("(TOP (NP (NN cat))".as_bytes()));
        let result: Result<Vec<_>, _> = reader.trees().collect();
        assert!(matches!(result, Err(ReadError::Unbalanced { .. })));
    }

    #[test]
    fn unexpected_token() {
        // A phrase cannot mix children and a word form.
        assert!(matches!(
            parse_tree("(TOP (NP (NN cat) dog))"),
            Err(ReadError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(parse_tree(""), Err(ReadError::Empty)));
        assert!(matches!(parse_tree("(TOP)"), Err(ReadError::Empty)));
    }

    #[test]
    fn display_parse_round_trip() {
        let text = "(TOP (S (NP-SBJ (NNP John)) (VP (VBD saw) (NP (NNP Mary)))))";
        let tree: CTTree = text.parse().unwrap();
        assert_eq!(tree.to_string(), text);
    }

    #[test]
    fn brackets_reverted() {
        assert_eq!(revert_brackets("-LRB-"), "(");
        assert_eq!(revert_brackets("-RCB-"), "}");
        assert_eq!(revert_brackets("word"), "word");
    }
}
