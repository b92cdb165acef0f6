use crate::Board;

/// The board as rows of [card symbols](crate::CardVariant::symbol), with
/// tokens shown as the digit of their owner.
pub fn board_rows(board: &Board) -> Vec<String> {
    (0..board.height())
        .map(|y| {
            (0..board.width())
                .map(|x| match board.token_at(x, y) {
                    Some(token) => char::from_digit(token.owner as u32 % 10, 10).unwrap_or('?'),
                    None => board.tile(x, y).variant.symbol(),
                })
                .collect()
        })
        .collect()
}

/// Draws the board in a box with coordinates, followed by one line per player.
pub fn visualize_board(board: &Board) -> String {
    let mut result = String::from("    ");
    for x in 0..board.width() {
        result += &format!("{:>2}", x);
    }
    result += "\n    ╭";
    for _ in 0..board.width() {
        result += "──";
    }
    result += "╮\n";
    for (y, row) in board_rows(board).iter().enumerate() {
        result += &format!("{:>3} │", y);
        for symbol in row.chars() {
            result.push(symbol);
            result.push(' ');
        }
        result += "│\n";
    }
    result += "    ╰";
    for _ in 0..board.width() {
        result += "──";
    }
    result += "╯";
    result += &format!("\nShadow copies {}", board.last_non_mimic_card());
    for player in board.players() {
        result += &format!(
            "\n{} ({}): score {}, hand [{}]",
            player,
            player.id,
            board.score(player.id),
            player
                .hand
                .iter()
                .map(|c| c.variant.symbol())
                .collect::<String>()
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlayerState, Strategy};

    #[test]
    fn rows_show_tokens() {
        let mut board = Board::from_rows(
            &["dl", "#t"],
            vec![
                PlayerState::new(0, "Red", false, 0, Strategy::RobustOpening),
                PlayerState::new(1, "Blue", false, 0, Strategy::RobustOpening),
            ],
        );
        board.place_token(1, 1, 0);
        assert_eq!(board_rows(&board), vec!["d1", "#t"]);
        let drawing = visualize_board(&board);
        assert!(drawing.contains("d 1 "));
        assert!(drawing.contains("Blue Player (1)"));
    }
}
