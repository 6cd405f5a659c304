use super::*;

fn game_from(placement: &str, turn: Color) -> Game {
    Game::from_board(Board::from_placement(placement).unwrap(), turn).unwrap()
}

#[test]
fn test_new_game_state() {
    let g = new_game();
    assert_eq!(g.turn(), Color::White);
    assert_eq!(g.status(), GameStatus::InProgress);
    assert_eq!(g.winner(), None);
    assert!(g.history().is_empty());
    assert_eq!(g.board().pieces().count(), 32);
}

#[test]
fn test_simple_move_toggles_turn() {
    let mut g = Game::new();
    let r = g.play_turn([4, 1], [4, 3]);
    assert!(r.success, "{}", r.message);
    assert_eq!(r.message, "Move successful");
    assert_eq!(r.captured, None);
    assert!(!r.is_check);
    assert_eq!(g.turn(), Color::Black);
    assert_eq!(g.history().len(), 1);
    assert_eq!(g.history()[0].to_string(), "e2e4");
}

#[test]
fn test_rejections_in_order() {
    let mut g = Game::new();

    let r = g.play_turn([8, 1], [4, 3]);
    assert!(!r.success);
    assert_eq!(r.message, "Invalid coordinate: (8, 1) is off the board.");

    let r = g.play_turn([4, 4], [4, 5]);
    assert_eq!(r.message, "No piece at start position.");

    let r = g.play_turn([4, 6], [4, 4]);
    assert_eq!(r.message, "It's white's turn. You cannot move black pieces.");

    let r = g.play_turn([0, 1], [0, 4]);
    assert_eq!(r.message, "Invalid move for Pawn at (0, 1) to (0, 4).");

    // nothing changed
    assert_eq!(g.turn(), Color::White);
    assert_eq!(g.board(), &Board::standard());
    assert!(g.history().is_empty());
}

#[test]
fn test_invalid_destination_coordinate() {
    let mut g = Game::new();
    assert_eq!(
        g.try_play_turn([4, 1], [4, -1]),
        Err(MoveError::InvalidCoordinate { x: 4, y: -1 })
    );
}

#[test]
fn test_move_into_check_rejected() {
    // white king on e1, black rook on d8: Kd1 and Kd2 walk into it
    let mut g = game_from("3r3k/8/8/8/8/8/8/4K3", Color::White);
    assert_eq!(
        g.try_play_turn([4, 0], [3, 0]),
        Err(MoveError::LeavesKingInCheck)
    );
    assert_eq!(g.turn(), Color::White);
    assert!(g.play_turn([4, 0], [5, 0]).success);
}

#[test]
fn test_pinned_piece_rejected_and_board_untouched() {
    let mut g = game_from("4r2k/8/8/8/8/8/4N3/4K3", Color::White);
    let before = g.board().clone();
    let r = g.play_turn([4, 1], [2, 2]);
    assert!(!r.success);
    assert_eq!(r.message, "Illegal move: your king would be in check!");
    assert_eq!(g.board(), &before);
}

#[test]
fn test_capture_reported() {
    let mut g = Game::new();
    assert!(g.play_turn([4, 1], [4, 3]).success);
    assert!(g.play_turn([3, 6], [3, 4]).success);
    let r = g.play_turn([4, 3], [3, 4]);
    assert!(r.success);
    assert_eq!(r.captured, Some(PieceKind::Pawn));
    let cap = r.captured_piece.unwrap();
    assert_eq!(cap.color, Color::Black);
    assert_eq!(cap.id.to_string(), "BP4");
    assert_eq!(r.moved_piece.unwrap().id.to_string(), "WP5");
    assert_eq!(g.history()[2].to_string(), "e4xd5");
    assert_eq!(g.board().pieces().count(), 31);
}

#[test]
fn test_check_status() {
    // Rook lift to e-file gives check; black can step aside
    let mut g = game_from("4k3/8/8/8/8/8/8/K6R", Color::White);
    let r = g.play_turn([7, 0], [4, 0]);
    assert!(r.success);
    assert!(r.is_check);
    assert!(!r.is_checkmate);
    assert_eq!(r.message, "Check!");
    assert_eq!(g.status(), GameStatus::Check(Color::Black));
    assert_eq!(g.winner(), None);
}

#[test]
fn test_back_rank_mate() {
    let mut g = game_from("6k1/5ppp/8/8/8/8/8/K6R", Color::White);
    let r = g.play_turn([7, 0], [7, 7]);
    assert!(!r.success, "h-file is blocked by the h7 pawn");

    let mut g = game_from("6k1/5ppp/8/8/8/8/8/K3R3", Color::White);
    let r = g.play_turn([4, 0], [4, 7]);
    assert!(r.success);
    assert!(r.is_check);
    assert!(r.is_checkmate);
    assert_eq!(r.winner, Some(Color::White));
    assert_eq!(r.message, "Checkmate! White wins!");
    assert_eq!(g.status(), GameStatus::Checkmate(Color::Black));
    assert!(g.is_over());

    let r = g.play_turn([6, 7], [7, 7]);
    assert!(!r.success);
    assert_eq!(r.message, "The game is over: checkmate.");
}

#[test]
fn test_stalemate() {
    // Qb6 leaves the cornered black king with no move and no check
    let mut g = game_from("k7/2K5/8/1Q6/8/8/8/8", Color::White);
    let r = g.play_turn([1, 4], [1, 5]);
    assert!(r.success);
    assert!(r.is_stalemate);
    assert!(!r.is_check);
    assert_eq!(r.winner, None);
    assert_eq!(g.status(), GameStatus::Stalemate);

    let r = g.play_turn([0, 7], [0, 6]);
    assert_eq!(r.message, "The game is over: stalemate.");
}

#[test]
fn test_from_board_rejects_bad_king_count() {
    let b = Board::from_placement("8/8/8/8/8/8/8/4K3").unwrap();
    assert_eq!(
        Game::from_board(b, Color::White).unwrap_err(),
        ChessError::KingCount {
            color: Color::Black,
            count: 0
        }
    );

    let b = Board::from_placement("k6k/8/8/8/8/8/8/4K3").unwrap();
    assert!(Game::from_board(b, Color::White).is_err());
}

#[test]
fn test_from_board_rejects_side_not_to_move_in_check() {
    // white rook on e1 gives check to the black king on e8
    let b = Board::from_placement("4k3/8/8/8/8/8/8/K3R3").unwrap();
    assert_eq!(
        Game::from_board(b.clone(), Color::White).unwrap_err(),
        ChessError::OpponentInCheck {
            color: Color::Black
        }
    );

    // the same board is fine with Black to answer the check
    let mut g = Game::from_board(b, Color::Black).unwrap();
    assert_eq!(g.status(), GameStatus::Check(Color::Black));
    let r = g.play_turn([4, 7], [3, 7]);
    assert!(r.success, "{}", r.message);
    assert_eq!(g.board().count_kings(Color::Black), 1);
}

#[test]
fn test_move_ignoring_check_rejected() {
    // black rook on e1 checks the white king on a1 along the first rank
    let mut g = game_from("4k3/8/8/8/8/8/3P4/K3r3", Color::White);
    assert_eq!(g.status(), GameStatus::Check(Color::White));
    let before = g.board().clone();

    // d2 pawn pushes do not cover the first rank
    assert_eq!(g.try_play_turn([3, 1], [3, 2]), Err(MoveError::LeavesKingInCheck));
    let r = g.play_turn([3, 1], [3, 3]);
    assert!(!r.success);
    assert_eq!(r.message, "Illegal move: your king would be in check!");
    assert_eq!(g.board(), &before);
    assert_eq!(g.turn(), Color::White);
    assert!(g.history().is_empty());

    // stepping off the rank answers it
    let r = g.play_turn([0, 0], [0, 1]);
    assert!(r.success, "{}", r.message);
    assert_eq!(g.turn(), Color::Black);
}

#[test]
fn test_from_board_detects_existing_mate() {
    let g = game_from("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR", Color::White);
    assert_eq!(g.status(), GameStatus::Checkmate(Color::White));
    assert_eq!(g.winner(), Some(Color::Black));
}

#[test]
fn test_legal_moves_from() {
    let g = Game::new();
    let mut knight = g.legal_moves_from([1, 0]);
    knight.sort();
    assert_eq!(
        knight,
        vec![Position::new(0, 2).unwrap(), Position::new(2, 2).unwrap()]
    );
    // opponent piece, empty square, off-board
    assert!(g.legal_moves_from([1, 7]).is_empty());
    assert!(g.legal_moves_from([4, 4]).is_empty());
    assert!(g.legal_moves_from([9, 9]).is_empty());
}

#[test]
fn test_get_piece_at() {
    let g = Game::new();
    let p = g.get_piece_at([4, 0]).unwrap().unwrap();
    assert_eq!(p.color, Color::White);
    assert_eq!(p.kind, PieceKind::King);
    assert!(g.get_piece_at([4, 4]).unwrap().is_none());
    assert!(g.get_piece_at([4, 8]).is_err());
}

#[test]
fn test_board_state_json_shape() {
    let g = Game::new();
    let json: serde_json::Value = serde_json::from_str(&g.board_state_json().unwrap()).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 8);
    assert_eq!(
        rows[0][4],
        serde_json::json!({"type": "King", "color": "black", "id": "BK"})
    );
    assert_eq!(rows[6][0]["type"], "Pawn");
    assert_eq!(rows[6][0]["color"], "white");
    assert!(rows[4][4].is_null());
}

#[test]
fn test_move_result_json() {
    let mut g = Game::new();
    let ok = g.play_turn([6, 0], [5, 2]);
    let v: serde_json::Value = serde_json::from_str(&ok.to_json().unwrap()).unwrap();
    assert_eq!(v["success"], true);
    assert_eq!(v["message"], "Move successful");
    assert!(v["captured"].is_null());
    assert!(v["winner"].is_null());
    assert_eq!(v["moved_piece"]["id"], "WN2");
    assert!(v.get("captured_piece").is_none());

    let bad = g.play_turn([6, 0], [5, 2]);
    let v: serde_json::Value = serde_json::from_str(&bad.to_json().unwrap()).unwrap();
    assert_eq!(v["success"], false);
    assert!(v.get("moved_piece").is_none());
}

#[test]
fn test_status_serialization() {
    let v = serde_json::to_value(GameStatus::Checkmate(Color::Black)).unwrap();
    assert_eq!(v, serde_json::json!({"state": "checkmate", "color": "black"}));
    let v = serde_json::to_value(GameStatus::InProgress).unwrap();
    assert_eq!(v, serde_json::json!({"state": "in_progress"}));
}
