//! Standard algebraic notation (`Nf3`, `exd5`, `e8=Q+`, `O-O-O`).
//!
//! Rendering needs the legal move list (for disambiguation) and the position
//! after the move (for the check and mate suffix). Parsing is lenient about
//! decoration: `0-0` for `O-O`, a promotion without `=`, and trailing
//! `+`, `#`, `!` or `?` are all accepted.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenResult;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::{Move, SpecialMove};
use crate::utils::algebraic::{algebraic_to_square, square_name};

/// SAN for `mv`, which must be legal in `game_state`.
pub fn move_to_san<A: AttackTable>(
    generator: &LegalMoveGenerator<A>,
    game_state: &GameState,
    mv: Move,
) -> MoveGenResult<String> {
    let mut scratch = game_state.clone();
    let legal_moves = generator.legal_moves_in_place(&mut scratch)?;

    let mut san = match mv.special {
        SpecialMove::CastleKingSide => "O-O".to_owned(),
        SpecialMove::CastleQueenSide => "O-O-O".to_owned(),
        _ => body_without_suffix(mv, &legal_moves),
    };

    apply_move(&mut scratch, mv)?;
    if generator.is_in_check(&scratch, scratch.side_to_move) {
        let replies = generator.legal_moves_in_place(&mut scratch)?;
        san.push(if replies.is_empty() { '#' } else { '+' });
    }

    Ok(san)
}

fn body_without_suffix(mv: Move, legal_moves: &[Move]) -> String {
    let mut out = String::with_capacity(8);

    if mv.piece == PieceKind::Pawn {
        if mv.is_capture() {
            out.push(char::from(b'a' + file_of(mv.from)));
            out.push('x');
        }
        out.push_str(&square_name(mv.to));
        if let Some(piece) = mv.promotion() {
            out.push('=');
            out.push(piece.letter());
        }
        return out;
    }

    out.push(mv.piece.letter());

    let rivals: Vec<Square> = legal_moves
        .iter()
        .filter(|other| other.piece == mv.piece && other.to == mv.to && other.from != mv.from)
        .map(|other| other.from)
        .collect();
    if !rivals.is_empty() {
        let file_unique = rivals.iter().all(|&sq| file_of(sq) != file_of(mv.from));
        let rank_unique = rivals.iter().all(|&sq| rank_of(sq) != rank_of(mv.from));
        if file_unique {
            out.push(char::from(b'a' + file_of(mv.from)));
        } else if rank_unique {
            out.push(char::from(b'1' + rank_of(mv.from)));
        } else {
            out.push_str(&square_name(mv.from));
        }
    }

    if mv.is_capture() {
        out.push('x');
    }
    out.push_str(&square_name(mv.to));
    out
}

/// Parsed shape of a SAN token before it is matched against legal moves.
struct SanPattern {
    piece: PieceKind,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    to: Square,
    promotion: Option<PieceKind>,
}

/// Find the legal move written as `text` in SAN.
pub fn parse_san(text: &str, legal_moves: &[Move]) -> ChessResult<Move> {
    let token = text.trim().trim_end_matches(['+', '#', '!', '?']);
    if token.is_empty() || !token.is_ascii() {
        return Err(ChessError::InvalidNotation(text.to_owned()));
    }

    let castle = match token {
        "O-O" | "0-0" => Some(SpecialMove::CastleKingSide),
        "O-O-O" | "0-0-0" => Some(SpecialMove::CastleQueenSide),
        _ => None,
    };
    if let Some(special) = castle {
        return legal_moves
            .iter()
            .copied()
            .find(|mv| mv.special == special)
            .ok_or_else(|| ChessError::illegal(token, "castling is not available"));
    }

    let pattern = parse_pattern(token).ok_or_else(|| ChessError::InvalidNotation(text.to_owned()))?;

    let mut candidates = legal_moves.iter().copied().filter(|mv| {
        mv.piece == pattern.piece
            && mv.to == pattern.to
            && mv.promotion() == pattern.promotion
            && pattern.from_file.map_or(true, |file| file_of(mv.from) == file)
            && pattern.from_rank.map_or(true, |rank| rank_of(mv.from) == rank)
    });

    match (candidates.next(), candidates.next()) {
        (Some(mv), None) => Ok(mv),
        (None, _) => Err(ChessError::illegal(token, "not a legal move in this position")),
        (Some(_), Some(_)) => Err(ChessError::illegal(token, "ambiguous move")),
    }
}

fn parse_pattern(token: &str) -> Option<SanPattern> {
    let mut body = token;

    // Promotion suffix: `=Q`, `Q`, or lower-case after the rank digit.
    let mut promotion = None;
    let bytes = body.as_bytes();
    if bytes.len() >= 3 {
        let last = bytes[bytes.len() - 1] as char;
        let before = bytes[bytes.len() - 2] as char;
        if last.is_ascii_alphabetic() && (before == '=' || before.is_ascii_digit()) {
            let piece = PieceKind::from_letter(last)?;
            if !PieceKind::PROMOTIONS.contains(&piece) {
                return None;
            }
            promotion = Some(piece);
            body = &body[..body.len() - 1];
            body = body.strip_suffix('=').unwrap_or(body);
        }
    }

    if body.len() < 2 {
        return None;
    }
    let to = algebraic_to_square(&body[body.len() - 2..]).ok()?;
    let mut prefix = &body[..body.len() - 2];

    let piece = match prefix.chars().next() {
        Some(ch) if ch.is_ascii_uppercase() => {
            prefix = &prefix[1..];
            match PieceKind::from_letter(ch)? {
                PieceKind::Pawn => return None,
                piece => piece,
            }
        }
        _ => PieceKind::Pawn,
    };

    prefix = prefix.strip_suffix('x').unwrap_or(prefix);

    let mut from_file = None;
    let mut from_rank = None;
    for ch in prefix.chars() {
        match ch {
            'a'..='h' if from_file.is_none() && from_rank.is_none() => {
                from_file = Some(ch as u8 - b'a');
            }
            '1'..='8' if from_rank.is_none() => from_rank = Some(ch as u8 - b'1'),
            _ => return None,
        }
    }

    if promotion.is_some() && piece != PieceKind::Pawn {
        return None;
    }

    Some(SanPattern {
        piece,
        from_file,
        from_rank,
        to,
        promotion,
    })
}

#[cfg(test)]
mod tests {
    use super::{move_to_san, parse_san};
    use crate::errors::ChessError;
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::move_generation::move_generator::MoveGenerator;
    use crate::moves::attack_table::PrecomputedAttacks;
    use crate::moves::chess_move::Move;

    fn setup(fen: &str) -> (LegalMoveGenerator, GameState, Vec<Move>) {
        let generator = LegalMoveGenerator::<PrecomputedAttacks>::default();
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let moves = generator.generate_legal_moves(&game).expect("position should generate");
        (generator, game, moves)
    }

    fn san_of(fen: &str, coordinate: &str) -> String {
        let (generator, game, moves) = setup(fen);
        let mv = moves
            .iter()
            .copied()
            .find(|mv| mv.to_string() == coordinate)
            .expect("move should be legal");
        move_to_san(&generator, &game, mv).expect("SAN should render")
    }

    #[test]
    fn renders_common_shapes() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(san_of(start, "e2e4"), "e4");
        assert_eq!(san_of(start, "g1f3"), "Nf3");
        assert_eq!(
            san_of("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2", "e4d5"),
            "exd5"
        );
        assert_eq!(san_of("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1c1"), "O-O-O");
    }

    #[test]
    fn renders_disambiguation() {
        // Knights on b1 and f1 can both reach d2.
        assert_eq!(san_of("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1", "b1d2"), "Nbd2");
        // Rooks on a1 and a5 share a file.
        assert_eq!(san_of("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1", "a1a3"), "R1a3");
    }

    #[test]
    fn renders_promotion_check_and_mate() {
        assert_eq!(san_of("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1", "b7b8q"), "b8=Q+");
        assert_eq!(
            san_of("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2", "d8h4"),
            "Qh4#"
        );
    }

    #[test]
    fn parses_lenient_forms() {
        let (_, _, moves) = setup("r3k2r/1P6/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(parse_san("0-0", &moves).expect("castle").is_castle());
        assert!(parse_san("O-O-O+", &moves).expect("castle").is_castle());

        let promo = parse_san("bxa8N", &moves).expect("capture promotion");
        assert_eq!(promo.promotion(), Some(PieceKind::Knight));
        assert_eq!(promo.captured, Some(PieceKind::Rook));

        let promo = parse_san("b8=Q!?", &moves).expect("push promotion");
        assert_eq!(promo.promotion(), Some(PieceKind::Queen));
    }

    #[test]
    fn ambiguity_and_errors() {
        let (_, _, moves) = setup("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1");
        assert!(matches!(parse_san("Nd2", &moves), Err(ChessError::IllegalMove { .. })));
        assert_eq!(parse_san("Nfd2", &moves).expect("disambiguated").from, 5);
        assert!(matches!(parse_san("Nd5", &moves), Err(ChessError::IllegalMove { .. })));
        for text in ["", "Zf3", "N", "e9", "Pe4", "Nf3=Q"] {
            assert!(
                matches!(parse_san(text, &moves), Err(ChessError::InvalidNotation(_))),
                "{text}"
            );
        }
    }
}
