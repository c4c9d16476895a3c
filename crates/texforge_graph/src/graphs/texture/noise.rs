// SPDX-License-Identifier: MIT OR Apache-2.0
//! Gradient noise and cellular noise helpers.

/// Ken Perlin's reference permutation
const PERM: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

fn perm(i: usize) -> usize {
    PERM[i & 255] as usize
}

fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn grad(hash: usize, x: f32, y: f32) -> f32 {
    let h = hash & 3;
    let (u, v) = if h < 2 { (x, y) } else { (y, x) };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

/// 2D gradient noise mapped to `[0, 1]`, tiling every 256 units
pub fn perlin(x: f32, y: f32) -> f32 {
    let xi = (x.floor() as i32 & 255) as usize;
    let yi = (y.floor() as i32 & 255) as usize;
    let xf = x - x.floor();
    let yf = y - y.floor();

    let u = fade(xf);
    let v = fade(yf);

    let aa = perm(perm(xi) + yi);
    let ab = perm(perm(xi) + yi + 1);
    let ba = perm(perm(xi + 1) + yi);
    let bb = perm(perm(xi + 1) + yi + 1);

    let x1 = lerp(grad(aa, xf, yf), grad(ba, xf - 1.0, yf), u);
    let x2 = lerp(grad(ab, xf, yf - 1.0), grad(bb, xf - 1.0, yf - 1.0), u);
    (lerp(x1, x2, v) + 1.0) * 0.5
}

/// Fractional Brownian motion: `octaves` layers of [`perlin`], each at
/// double the frequency and half the amplitude of the previous one
pub fn fbm(x: f32, y: f32, octaves: u32) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 1.0;
    for _ in 0..octaves {
        value += amplitude * perlin(x * frequency, y * frequency);
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    value
}

/// Jittered feature point of lattice cell `(ix, iy)`
fn cell_point(ix: i32, iy: i32, randomness: f32) -> [f32; 2] {
    let n = ix.wrapping_mul(374_761_393).wrapping_add(iy.wrapping_mul(668_265_263));
    let hash = (n ^ (n >> 13)).wrapping_mul(1_274_126_177);
    let fx = (hash & 0xFFFF) as f32 / 65535.0;
    let fy = ((hash >> 16) & 0xFFFF) as f32 / 65535.0;
    [
        ix as f32 + 0.5 + (fx - 0.5) * randomness,
        iy as f32 + 0.5 + (fy - 0.5) * randomness,
    ]
}

/// Distance to the nearest feature point in the surrounding 3x3 cells,
/// clamped to `[0, 1]`. Cell indices saturate far from the origin.
pub fn voronoi(x: f32, y: f32, randomness: f32) -> f32 {
    let cell_x = x.floor() as i32;
    let cell_y = y.floor() as i32;

    let mut min_dist = f32::MAX;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let (ix, iy) = (cell_x.wrapping_add(dx), cell_y.wrapping_add(dy));
            let [px, py] = cell_point(ix, iy, randomness);
            let dist = ((x - px).powi(2) + (y - py).powi(2)).sqrt();
            min_dist = min_dist.min(dist);
        }
    }
    min_dist.clamp(0.0, 1.0)
}
