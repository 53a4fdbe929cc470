//! Tests for direction indexing, cyclic arithmetic and grid offsets

#[cfg(test)]
mod tests {
    use looptile::spatial::direction::{Direction, SIDES};

    // Tests directions are listed clockwise from the top
    // Verified by swapping Right and Left in ALL
    #[test]
    fn test_all_is_clockwise_from_top() {
        for (index, direction) in Direction::ALL.into_iter().enumerate() {
            assert_eq!(direction.index(), index);
            assert_eq!(Direction::from_index(index), direction);
        }
        assert_eq!(Direction::ALL.len(), SIDES);
    }

    // Tests negative and oversized offsets wrap to the same side
    // Verified by using % instead of rem_euclid
    #[test]
    fn test_normalize_wraps_signed_offsets() {
        assert_eq!(Direction::normalize(-1_i32), Direction::Left);
        assert_eq!(Direction::normalize(3_i64), Direction::Left);
        assert_eq!(Direction::normalize(-4_i8), Direction::Top);
        assert_eq!(Direction::normalize(9_u32), Direction::Right);
        assert_eq!(Direction::normalize(-6_isize), Direction::Bottom);
    }

    // Tests opposite sides pair up and are involutive
    // Verified by offsetting opposite by one instead of two
    #[test]
    fn test_opposite_pairs() {
        assert_eq!(Direction::Top.opposite(), Direction::Bottom);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }

    // Tests clockwise and counter-clockwise turns undo each other
    // Verified by making counter_clockwise add one
    #[test]
    fn test_turns_are_inverse() {
        assert_eq!(Direction::Left.clockwise(), Direction::Top);
        assert_eq!(Direction::Top.counter_clockwise(), Direction::Left);
        for direction in Direction::ALL {
            assert_eq!(direction.clockwise().counter_clockwise(), direction);
        }
    }

    // Tests offsets point one tile away and cancel with the opposite side
    // Verified by flipping the sign of the top offset
    #[test]
    fn test_offsets_cancel_with_opposite() {
        assert_eq!(Direction::Top.offset(), [0, -1]);
        assert_eq!(Direction::Right.offset(), [1, 0]);
        for direction in Direction::ALL {
            let [dx, dy] = direction.offset();
            let [ox, oy] = direction.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    // Tests mask bits are distinct powers of two in side order
    // Verified by shifting mask bits by one
    #[test]
    fn test_mask_bits() {
        let bits: Vec<u8> = Direction::ALL.iter().map(|d| d.mask_bit()).collect();
        assert_eq!(bits, vec![1, 2, 4, 8]);
    }

    // Tests display uses lowercase side names
    // Verified by printing the debug representation
    #[test]
    fn test_display_names() {
        assert_eq!(Direction::Top.to_string(), "top");
        assert_eq!(Direction::Left.to_string(), "left");
    }
}
