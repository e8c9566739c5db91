//! Lookup tables used by the waveshape generators

/// The number of entries in the sine table, must be a power of 2
pub const SINE_LUT_SIZE: usize = 256;

/// One full cycle of a sine wave in `[-1.0, +1.0]`, starting at zero phase
pub const SINE_TABLE: [f32; SINE_LUT_SIZE] = [
    0.00000000_f32, 0.02454123_f32, 0.04906767_f32, 0.07356456_f32, 0.09801714_f32, 0.12241068_f32, 0.14673047_f32, 0.17096189_f32,
    0.19509032_f32, 0.21910124_f32, 0.24298018_f32, 0.26671276_f32, 0.29028468_f32, 0.31368174_f32, 0.33688985_f32, 0.35989504_f32,
    0.38268343_f32, 0.40524131_f32, 0.42755509_f32, 0.44961133_f32, 0.47139674_f32, 0.49289819_f32, 0.51410274_f32, 0.53499762_f32,
    0.55557023_f32, 0.57580819_f32, 0.59569930_f32, 0.61523159_f32, 0.63439328_f32, 0.65317284_f32, 0.67155895_f32, 0.68954054_f32,
    0.70710678_f32, 0.72424708_f32, 0.74095113_f32, 0.75720885_f32, 0.77301045_f32, 0.78834643_f32, 0.80320753_f32, 0.81758481_f32,
    0.83146961_f32, 0.84485357_f32, 0.85772861_f32, 0.87008699_f32, 0.88192126_f32, 0.89322430_f32, 0.90398929_f32, 0.91420976_f32,
    0.92387953_f32, 0.93299280_f32, 0.94154407_f32, 0.94952818_f32, 0.95694034_f32, 0.96377607_f32, 0.97003125_f32, 0.97570213_f32,
    0.98078528_f32, 0.98527764_f32, 0.98917651_f32, 0.99247953_f32, 0.99518473_f32, 0.99729046_f32, 0.99879546_f32, 0.99969882_f32,
    1.00000000_f32, 0.99969882_f32, 0.99879546_f32, 0.99729046_f32, 0.99518473_f32, 0.99247953_f32, 0.98917651_f32, 0.98527764_f32,
    0.98078528_f32, 0.97570213_f32, 0.97003125_f32, 0.96377607_f32, 0.95694034_f32, 0.94952818_f32, 0.94154407_f32, 0.93299280_f32,
    0.92387953_f32, 0.91420976_f32, 0.90398929_f32, 0.89322430_f32, 0.88192126_f32, 0.87008699_f32, 0.85772861_f32, 0.84485357_f32,
    0.83146961_f32, 0.81758481_f32, 0.80320753_f32, 0.78834643_f32, 0.77301045_f32, 0.75720885_f32, 0.74095113_f32, 0.72424708_f32,
    0.70710678_f32, 0.68954054_f32, 0.67155895_f32, 0.65317284_f32, 0.63439328_f32, 0.61523159_f32, 0.59569930_f32, 0.57580819_f32,
    0.55557023_f32, 0.53499762_f32, 0.51410274_f32, 0.49289819_f32, 0.47139674_f32, 0.44961133_f32, 0.42755509_f32, 0.40524131_f32,
    0.38268343_f32, 0.35989504_f32, 0.33688985_f32, 0.31368174_f32, 0.29028468_f32, 0.26671276_f32, 0.24298018_f32, 0.21910124_f32,
    0.19509032_f32, 0.17096189_f32, 0.14673047_f32, 0.12241068_f32, 0.09801714_f32, 0.07356456_f32, 0.04906767_f32, 0.02454123_f32,
    0.00000000_f32, -0.02454123_f32, -0.04906767_f32, -0.07356456_f32, -0.09801714_f32, -0.12241068_f32, -0.14673047_f32, -0.17096189_f32,
    -0.19509032_f32, -0.21910124_f32, -0.24298018_f32, -0.26671276_f32, -0.29028468_f32, -0.31368174_f32, -0.33688985_f32, -0.35989504_f32,
    -0.38268343_f32, -0.40524131_f32, -0.42755509_f32, -0.44961133_f32, -0.47139674_f32, -0.49289819_f32, -0.51410274_f32, -0.53499762_f32,
    -0.55557023_f32, -0.57580819_f32, -0.59569930_f32, -0.61523159_f32, -0.63439328_f32, -0.65317284_f32, -0.67155895_f32, -0.68954054_f32,
    -0.70710678_f32, -0.72424708_f32, -0.74095113_f32, -0.75720885_f32, -0.77301045_f32, -0.78834643_f32, -0.80320753_f32, -0.81758481_f32,
    -0.83146961_f32, -0.84485357_f32, -0.85772861_f32, -0.87008699_f32, -0.88192126_f32, -0.89322430_f32, -0.90398929_f32, -0.91420976_f32,
    -0.92387953_f32, -0.93299280_f32, -0.94154407_f32, -0.94952818_f32, -0.95694034_f32, -0.96377607_f32, -0.97003125_f32, -0.97570213_f32,
    -0.98078528_f32, -0.98527764_f32, -0.98917651_f32, -0.99247953_f32, -0.99518473_f32, -0.99729046_f32, -0.99879546_f32, -0.99969882_f32,
    -1.00000000_f32, -0.99969882_f32, -0.99879546_f32, -0.99729046_f32, -0.99518473_f32, -0.99247953_f32, -0.98917651_f32, -0.98527764_f32,
    -0.98078528_f32, -0.97570213_f32, -0.97003125_f32, -0.96377607_f32, -0.95694034_f32, -0.94952818_f32, -0.94154407_f32, -0.93299280_f32,
    -0.92387953_f32, -0.91420976_f32, -0.90398929_f32, -0.89322430_f32, -0.88192126_f32, -0.87008699_f32, -0.85772861_f32, -0.84485357_f32,
    -0.83146961_f32, -0.81758481_f32, -0.80320753_f32, -0.78834643_f32, -0.77301045_f32, -0.75720885_f32, -0.74095113_f32, -0.72424708_f32,
    -0.70710678_f32, -0.68954054_f32, -0.67155895_f32, -0.65317284_f32, -0.63439328_f32, -0.61523159_f32, -0.59569930_f32, -0.57580819_f32,
    -0.55557023_f32, -0.53499762_f32, -0.51410274_f32, -0.49289819_f32, -0.47139674_f32, -0.44961133_f32, -0.42755509_f32, -0.40524131_f32,
    -0.38268343_f32, -0.35989504_f32, -0.33688985_f32, -0.31368174_f32, -0.29028468_f32, -0.26671276_f32, -0.24298018_f32, -0.21910124_f32,
    -0.19509032_f32, -0.17096189_f32, -0.14673047_f32, -0.12241068_f32, -0.09801714_f32, -0.07356456_f32, -0.04906767_f32, -0.02454123_f32,
];
