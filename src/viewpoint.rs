use geist_geom::Vec3;
use geist_map::Viewpoint;

/// Per-frame movement intent, each axis in `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveInput {
    pub forward: f32,
    pub strafe: f32,
    pub rise: f32,
    pub turn: f32,
}

/// Free-flying observer. Yaw 0 faces +x; positive yaw turns toward +z.
#[derive(Clone, Debug)]
pub struct Player {
    pub position: Vec3,
    pub yaw: f32,
    pub speed: f32,
    pub turn_speed: f32,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: -90.0,
            speed: 12.0,
            turn_speed: 90.0,
        }
    }

    pub fn step(&mut self, input: &MoveInput, dt: f32) {
        self.yaw = (self.yaw + input.turn * self.turn_speed * dt).rem_euclid(360.0);
        let (s, c) = self.yaw.to_radians().sin_cos();
        let forward = Vec3::new(c, 0.0, s);
        let right = Vec3::new(-s, 0.0, c);
        let up = Vec3::new(0.0, 1.0, 0.0);
        let dir = forward * input.forward + right * input.strafe + up * input.rise;
        self.position += dir * (self.speed * dt);
    }
}

impl Viewpoint for Player {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4 && (a.z - b.z).abs() < 1e-4
    }

    #[test]
    fn starts_facing_north() {
        let mut p = Player::new(Vec3::ZERO);
        p.step(
            &MoveInput {
                forward: 1.0,
                ..Default::default()
            },
            1.0,
        );
        assert!(close(p.position, Vec3::new(0.0, 0.0, -12.0)));
    }

    #[test]
    fn strafe_is_perpendicular_to_heading() {
        let mut p = Player::new(Vec3::ZERO);
        p.yaw = 0.0;
        p.step(
            &MoveInput {
                strafe: 1.0,
                ..Default::default()
            },
            0.5,
        );
        assert!(close(p.position, Vec3::new(0.0, 0.0, 6.0)));
    }

    #[test]
    fn turning_wraps_yaw() {
        let mut p = Player::new(Vec3::ZERO);
        p.yaw = 350.0;
        p.step(
            &MoveInput {
                turn: 1.0,
                ..Default::default()
            },
            0.5,
        );
        assert!((p.yaw - 35.0).abs() < 1e-3);
    }
}
