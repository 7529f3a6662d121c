//! Premove chains and the pieces they put on display.
//!
//! A premove made by a piece that has already been premoved continues that
//! piece's chain; any other premove starts a new one. Chains are rebuilt from
//! the raw premove list on every call.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::position::Position;
use super::types::{Piece, Premove, Square};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStep {
    pub source: Square,
    pub target: Square,
    pub index: usize,
}

/// The route of one premoved piece. Each step starts where the previous one
/// ended, and a chain always has at least one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChainParts", into = "ChainParts")]
pub struct PremoveChain {
    pub piece: Piece,
    route: Vec<RouteStep>,
}

#[derive(Serialize, Deserialize)]
struct ChainParts {
    piece: Piece,
    route: Vec<RouteStep>,
}

impl TryFrom<ChainParts> for PremoveChain {
    type Error = Error;

    fn try_from(parts: ChainParts) -> Result<Self> {
        let broken = |reason: &str| Error::BrokenPremoveChain {
            piece: parts.piece.tag(),
            reason: reason.to_string(),
        };
        if parts.route.is_empty() {
            return Err(broken("empty route"));
        }
        if parts
            .route
            .windows(2)
            .any(|pair| pair[0].target != pair[1].source)
        {
            return Err(broken("steps do not connect"));
        }
        Ok(Self {
            piece: parts.piece,
            route: parts.route,
        })
    }
}

impl From<PremoveChain> for ChainParts {
    fn from(chain: PremoveChain) -> Self {
        Self {
            piece: chain.piece,
            route: chain.route,
        }
    }
}

impl PremoveChain {
    fn start(step: RouteStep, piece: Piece) -> Self {
        Self {
            piece,
            route: vec![step],
        }
    }

    pub fn route(&self) -> &[RouteStep] {
        &self.route
    }

    fn tip(&self) -> &RouteStep {
        let last = self.route.len() - 1;
        &self.route[last]
    }

    pub fn origin(&self) -> Square {
        self.route[0].source
    }

    pub fn destination(&self) -> Square {
        self.tip().target
    }

    /// Submission index of the most recent step.
    pub fn last_index(&self) -> usize {
        self.tip().index
    }

    fn continues_from(&self, premove: &Premove) -> bool {
        self.piece == premove.piece && self.tip().target == premove.source
    }

    fn revisits(&self, square: Square) -> bool {
        self.route.iter().any(|step| step.source == square)
    }
}

pub fn resolve_chains(premoves: &[Premove]) -> Result<Vec<PremoveChain>> {
    let mut chains: Vec<PremoveChain> = Vec::new();

    for (index, premove) in premoves.iter().enumerate() {
        let step = RouteStep {
            source: premove.source,
            target: premove.target,
            index,
        };

        if premove.source == premove.target {
            return Err(cyclic(premove));
        }

        match chains.iter_mut().find(|chain| chain.continues_from(premove)) {
            Some(chain) => {
                if chain.revisits(premove.target) {
                    return Err(cyclic(premove));
                }
                debug!(
                    piece = %premove.piece,
                    from = %premove.source,
                    to = %premove.target,
                    steps = chain.route.len() + 1,
                    "extending premove chain"
                );
                chain.route.push(step);
            }
            None => chains.push(PremoveChain::start(step, premove.piece)),
        }
    }

    Ok(chains)
}

fn cyclic(premove: &Premove) -> Error {
    Error::CyclicPremoveChain {
        piece: premove.piece.tag(),
        square: premove.target.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremoveOccupant {
    pub piece: Piece,
    pub index: usize,
}

/// Final destination of every chain. When several chains end on the same
/// square the most recently issued one is shown.
pub fn occupancy_from_chains(chains: &[PremoveChain]) -> BTreeMap<Square, PremoveOccupant> {
    let mut occupancy: BTreeMap<Square, PremoveOccupant> = BTreeMap::new();

    for chain in chains {
        let candidate = PremoveOccupant {
            piece: chain.piece,
            index: chain.last_index(),
        };
        occupancy
            .entry(chain.destination())
            .and_modify(|current| {
                if candidate.index > current.index {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }

    occupancy
}

/// Squares touched by any premove. The real piece on these squares is hidden
/// and the square gets premove styling.
pub fn premove_squares(premoves: &[Premove]) -> BTreeSet<Square> {
    premoves
        .iter()
        .flat_map(|premove| [premove.source, premove.target])
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayedPiece {
    Real { piece: Piece },
    Premoved { piece: Piece, index: usize },
}

impl DisplayedPiece {
    pub fn piece(&self) -> Piece {
        match self {
            DisplayedPiece::Real { piece } | DisplayedPiece::Premoved { piece, .. } => *piece,
        }
    }

    pub fn is_premoved(&self) -> bool {
        matches!(self, DisplayedPiece::Premoved { .. })
    }
}

/// What each square shows. Squares missing from the map are empty.
pub fn resolve_display(
    position: &Position,
    premoves: &[Premove],
    allow_premoves: bool,
) -> Result<BTreeMap<Square, DisplayedPiece>> {
    if !allow_premoves {
        return Ok(position
            .iter()
            .map(|(&square, &piece)| (square, DisplayedPiece::Real { piece }))
            .collect());
    }

    let chains = resolve_chains(premoves)?;
    let occupancy = occupancy_from_chains(&chains);
    let in_flight = premove_squares(premoves);

    let mut display: BTreeMap<Square, DisplayedPiece> = position
        .iter()
        .filter(|(square, _)| !in_flight.contains(square))
        .map(|(&square, &piece)| (square, DisplayedPiece::Real { piece }))
        .collect();

    for (square, occupant) in occupancy {
        display.insert(
            square,
            DisplayedPiece::Premoved {
                piece: occupant.piece,
                index: occupant.index,
            },
        );
    }

    Ok(display)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn premove(source: &str, target: &str, piece: &str) -> Premove {
        Premove::new(source.parse().unwrap(), target.parse().unwrap(), piece.parse().unwrap())
    }

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_malformed_chain_rejected_on_load() {
        let empty = serde_json::from_str::<PremoveChain>(r#"{"piece":"wP","route":[]}"#);
        assert!(empty.is_err());

        let gapped = serde_json::from_str::<PremoveChain>(
            r#"{"piece":"wN","route":[
                {"source":"g1","target":"f3","index":0},
                {"source":"b1","target":"c3","index":1}
            ]}"#,
        );
        assert!(gapped.is_err());

        let chain: PremoveChain = serde_json::from_str(
            r#"{"piece":"wN","route":[
                {"source":"g1","target":"f3","index":0},
                {"source":"f3","target":"e5","index":3}
            ]}"#,
        )
        .unwrap();
        let occupancy = occupancy_from_chains(&[chain]);
        assert_eq!(occupancy[&sq("e5")].index, 3);
    }

    #[test]
    fn test_empty_list() {
        let chains = resolve_chains(&[]).unwrap();
        assert!(chains.is_empty());
        assert!(occupancy_from_chains(&chains).is_empty());
        assert!(premove_squares(&[]).is_empty());
    }

    #[test]
    fn test_chain_and_tie_break() {
        let premoves = [
            premove("e2", "e4", "wP"),
            premove("e4", "e5", "wP"),
            premove("d7", "e5", "bP"),
        ];
        let chains = resolve_chains(&premoves).unwrap();
        assert_eq!(chains.len(), 2);

        assert_eq!(chains[0].piece.tag(), "wP");
        assert_eq!(chains[0].route().len(), 2);
        assert_eq!(chains[0].origin(), sq("e2"));
        assert_eq!(chains[0].destination(), sq("e5"));

        assert_eq!(chains[1].piece.tag(), "bP");
        assert_eq!(chains[1].destination(), sq("e5"));

        let occupancy = occupancy_from_chains(&chains);
        assert_eq!(occupancy.len(), 1);
        assert_eq!(occupancy[&sq("e5")].piece.tag(), "bP");
        assert_eq!(occupancy[&sq("e5")].index, 2);
    }

    #[test]
    fn test_tie_break_ignores_chain_order() {
        let premoves = [
            premove("g1", "f3", "wN"),
            premove("b1", "c3", "wN"),
            premove("c3", "e4", "wN"),
            premove("f3", "e5", "wN"),
            premove("e4", "d6", "wN"),
            premove("e5", "d6", "wN"),
        ];
        let chains = resolve_chains(&premoves).unwrap();
        assert_eq!(chains.len(), 2);

        let occupancy = occupancy_from_chains(&chains);
        assert_eq!(occupancy[&sq("d6")].index, 5);
    }

    #[test]
    fn test_same_piece_kind_does_not_join_unrelated_chain() {
        let premoves = [premove("a2", "a3", "wP"), premove("b2", "b3", "wP")];
        let chains = resolve_chains(&premoves).unwrap();
        assert_eq!(chains.len(), 2);
        assert!(chains.iter().all(|chain| chain.route().len() == 1));
    }

    #[test]
    fn test_other_color_does_not_continue_chain() {
        let premoves = [premove("e2", "e4", "wQ"), premove("e4", "e6", "bQ")];
        let chains = resolve_chains(&premoves).unwrap();
        assert_eq!(chains.len(), 2);
    }

    #[test]
    fn test_cyclic_chain_is_rejected() {
        let premoves = [
            premove("e2", "e4", "wQ"),
            premove("e4", "e6", "wQ"),
            premove("e6", "e2", "wQ"),
        ];
        assert!(matches!(
            resolve_chains(&premoves),
            Err(Error::CyclicPremoveChain { .. })
        ));
        assert!(resolve_chains(&[premove("e2", "e2", "wQ")]).is_err());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let premoves = [premove("g1", "f3", "wN"), premove("f3", "g5", "wN")];
        let first = resolve_chains(&premoves).unwrap();
        let second = resolve_chains(&premoves).unwrap();
        assert_eq!(first, second);
        assert_eq!(occupancy_from_chains(&first), occupancy_from_chains(&second));
    }

    #[test]
    fn test_display_hides_real_pieces_under_premoves() {
        let mut position = Position::new();
        position.insert(sq("e2"), "wP".parse().unwrap());
        position.insert(sq("d2"), "wP".parse().unwrap());
        position.insert(sq("e7"), "bP".parse().unwrap());

        let premoves = [premove("e2", "e4", "wP")];
        let display = resolve_display(&position, &premoves, true).unwrap();

        assert!(!display.contains_key(&sq("e2")));
        assert_eq!(
            display[&sq("e4")],
            DisplayedPiece::Premoved {
                piece: "wP".parse().unwrap(),
                index: 0
            }
        );
        assert_eq!(display[&sq("d2")], DisplayedPiece::Real { piece: "wP".parse().unwrap() });
        assert!(!display[&sq("e7")].is_premoved());
    }

    #[test]
    fn test_display_ignores_premoves_when_disabled() {
        let mut position = Position::new();
        position.insert(sq("e2"), "wP".parse().unwrap());

        let premoves = [premove("e2", "e4", "wP")];
        let display = resolve_display(&position, &premoves, false).unwrap();
        assert_eq!(display.len(), 1);
        assert_eq!(display[&sq("e2")].piece().tag(), "wP");
    }
}
