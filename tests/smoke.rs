use mdcommand_args::{CommandArgs, LocationParameter, ValueParameter};
use mdcommand_testkit::{init_test_logging, TestContext};

#[test]
fn location_parses_against_fixture_server() {
    init_test_logging();
    let ctx = TestContext::player("Notch");
    let mut args = CommandArgs::parse("#target").expect("tokenize");
    let location = LocationParameter::new()
        .parse(&ctx, &mut args)
        .expect("parse location");
    assert_eq!(location.world.name, "world");
    assert_eq!(location.position, glam::DVec3::new(5.0, 65.0, 0.0));
}
