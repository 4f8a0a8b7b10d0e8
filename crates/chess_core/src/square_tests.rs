use super::*;

#[test]
fn test_corner_indices() {
    assert_eq!(square(0, 0), A1);
    assert_eq!(square(7, 0), H1);
    assert_eq!(square(0, 7), A8);
    assert_eq!(square(7, 7), H8);
    assert_eq!(coord_to_sq("e1"), Some(E1));
    assert_eq!(sq_to_coord(G8), "g8");
}

#[test]
fn test_border_ring() {
    assert_eq!(all_squares().count(), 64);
    assert!(all_squares().all(is_on_board));
    // one step off each edge lands on a sentinel
    assert!(!is_on_board(offset(A1, WEST)));
    assert!(!is_on_board(offset(H1, EAST)));
    assert!(!is_on_board(offset(A1, SOUTH)));
    assert!(!is_on_board(offset(H8, NORTH)));
    // knight jumps from the corner stay inside the frame
    for jump in KNIGHT_JUMPS {
        let to = offset(A1, jump);
        assert!((to as usize) < BOARD_SIZE);
    }
}

#[test]
fn test_coord_rejects_garbage() {
    assert_eq!(coord_to_sq("i1"), None);
    assert_eq!(coord_to_sq("a9"), None);
    assert_eq!(coord_to_sq("a"), None);
}

#[test]
fn test_light_squares() {
    assert!(!is_light(A1));
    assert!(is_light(H1));
    assert!(is_light(A8));
    assert!(!is_light(H8));
    assert!(is_light(coord_to_sq("d1").unwrap()));
}

#[test]
fn test_table_index_and_mirror() {
    assert_eq!(table_index(A8), 0);
    assert_eq!(table_index(H1), 63);
    assert_eq!(mirror(A1), A8);
    assert_eq!(mirror(coord_to_sq("e2").unwrap()), coord_to_sq("e7").unwrap());
}

#[test]
fn test_manhattan_distance() {
    assert_eq!(manhattan_distance(A1, H8), 14);
    assert_eq!(manhattan_distance(E1, E8), 7);
    assert_eq!(manhattan_distance(D1, D1), 0);
}
