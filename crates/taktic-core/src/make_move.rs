//! Move execution via copy-make.

use crate::color::Color;
use crate::error::MoveError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::square::{Direction, MAX_SIZE, Square};
use crate::tak_move::{Drops, Move, MoveKind};

impl Position {
    /// Apply `mv` and return the resulting position.
    pub fn apply(&self, mv: &Move) -> Result<Position, MoveError> {
        self.validate(mv)?;
        let mut child = self.clone();
        child.execute(mv);
        Ok(child)
    }

    /// Apply `mv`, writing the result into `dest` and reusing its allocations.
    ///
    /// On error `dest` is left untouched.
    pub fn apply_into(&self, mv: &Move, dest: &mut Position) -> Result<(), MoveError> {
        self.validate(mv)?;
        dest.clone_from(self);
        dest.execute(mv);
        Ok(())
    }

    /// The color of a stone placed this ply: the opponent's during the opening.
    #[inline]
    pub fn placement_color(&self) -> Color {
        if self.is_opening() {
            !self.side_to_move()
        } else {
            self.side_to_move()
        }
    }

    /// Check that `mv` is legal here without changing anything.
    pub fn validate(&self, mv: &Move) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        let size = self.size();
        let sq = mv.square();
        if !sq.on_board(size) {
            return Err(MoveError::OutOfBounds);
        }

        match mv.kind() {
            MoveKind::Place(kind) => self.validate_placement(sq, kind),
            MoveKind::Slide { dir, drops } => self.validate_slide(sq, dir, drops),
        }
    }

    fn validate_placement(&self, sq: Square, kind: PieceKind) -> Result<(), MoveError> {
        if !self.stack_at(sq).is_empty() {
            return Err(MoveError::Occupied);
        }
        if self.is_opening() && kind != PieceKind::Flat {
            return Err(MoveError::FirstMoveMustBeFlat);
        }
        let reserves = self.reserves(self.placement_color());
        match kind {
            PieceKind::Capstone if reserves.capstones == 0 => {
                Err(MoveError::NoReserves { kind: "capstones" })
            }
            PieceKind::Flat | PieceKind::Standing if reserves.flats == 0 => {
                Err(MoveError::NoReserves { kind: "flats" })
            }
            _ => Ok(()),
        }
    }

    fn validate_slide(&self, sq: Square, dir: Direction, drops: Drops) -> Result<(), MoveError> {
        if self.is_opening() {
            return Err(MoveError::NoSlideOnOpeningPly);
        }
        let size = self.size();
        let source = self.stack_at(sq);
        let Some(&top) = source.first() else {
            return Err(MoveError::NotYourStack);
        };
        if top.color() != self.side_to_move() {
            return Err(MoveError::NotYourStack);
        }
        let carry = drops.carry();
        if drops.is_empty() || carry > size || carry > source.len() {
            return Err(MoveError::BadCarry { carry });
        }

        let last = drops.len() - 1;
        let mut at = sq;
        for (i, count) in drops.iter().enumerate() {
            at = at.step(dir, size).ok_or(MoveError::OutOfBounds)?;
            let Some(blocker) = self.stack_at(at).first() else {
                continue;
            };
            match blocker.kind() {
                PieceKind::Flat => {}
                PieceKind::Standing => {
                    // Only a capstone travelling alone may flatten a wall, and
                    // only as the final drop.
                    let flattens = i == last && count == 1 && top.kind() == PieceKind::Capstone;
                    if !flattens {
                        return Err(MoveError::Blocked);
                    }
                }
                PieceKind::Capstone => return Err(MoveError::Blocked),
            }
        }
        Ok(())
    }

    /// Perform an already-validated move.
    fn execute(&mut self, mv: &Move) {
        match mv.kind() {
            MoveKind::Place(kind) => {
                let color = self.placement_color();
                let reserves = self.reserves_mut(color);
                match kind {
                    PieceKind::Capstone => reserves.capstones -= 1,
                    _ => reserves.flats -= 1,
                }
                self.square_mut(mv.square()).push(Piece::new(kind, color));
            }
            MoveKind::Slide { dir, drops } => self.execute_slide(mv.square(), dir, drops),
        }
        self.finish_move();
    }

    fn execute_slide(&mut self, from: Square, dir: Direction, drops: Drops) {
        let size = self.size();
        let carry = drops.carry();

        // Lifted stones, top-first like the stacks themselves.
        let mut hand = [Piece::WHITE_FLAT; MAX_SIZE];
        {
            let source = self.square_mut(from);
            hand[..carry].copy_from_slice(&source[..carry]);
            let len = source.len();
            source.rotate_left(carry);
            source.truncate(len - carry);
        }

        // The bottom of the hand is dropped first.
        let mut remaining = carry;
        let mut at = from;
        for count in drops.iter() {
            let count = count as usize;
            let Some(next) = at.step(dir, size) else {
                break;
            };
            at = next;
            let target = self.square_mut(at);
            if let Some(top) = target.first_mut()
                && top.kind() == PieceKind::Standing
            {
                *top = top.flattened();
            }
            target.extend_from_slice(&hand[remaining - count..remaining]);
            target.rotate_right(count);
            remaining -= count;
        }
    }
}
