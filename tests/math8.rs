mod tests {
    use spotlight_node::math8::{dim8, max_distance, step_toward};

    #[test]
    fn test_dim8() {
        assert_eq!(dim8(255, 255), 255);
        assert_eq!(dim8(255, 0), 0);
        assert_eq!(dim8(200, 128), 100);
        assert_eq!(dim8(100, 128), 50);
        assert_eq!(dim8(50, 128), 25);
        assert_eq!(dim8(1, 254), 0);
    }

    #[test]
    fn test_step_toward() {
        assert_eq!(step_toward(0, 10), 1);
        assert_eq!(step_toward(10, 0), 9);
        assert_eq!(step_toward(7, 7), 7);
        assert_eq!(step_toward(254, 255), 255);
    }

    #[test]
    fn test_max_distance() {
        assert_eq!(max_distance([0, 0, 0], [0, 0, 0]), 0);
        assert_eq!(max_distance([10, 200, 30], [20, 100, 30]), 100);
        assert_eq!(max_distance([0, 0, 255], [255, 0, 0]), 255);
    }
}
