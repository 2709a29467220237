/// Lowercase letter -> its QWERTY neighbor keys, used for neighbor-key typo
/// substitution. Mirrors a physical QWERTY layout, not a dictionary.
pub fn neighbors(ch: char) -> Option<&'static [char]> {
    match ch {
        'a' => Some(&['q', 's']),
        'b' => Some(&['v', 'n']),
        'c' => Some(&['x', 'v']),
        'd' => Some(&['s', 'f']),
        'e' => Some(&['w', 'r']),
        'f' => Some(&['d', 'g']),
        'g' => Some(&['f', 'h']),
        'h' => Some(&['g', 'j']),
        'i' => Some(&['u', 'o']),
        'j' => Some(&['h', 'k']),
        'k' => Some(&['j', 'l']),
        'l' => Some(&['k']),
        'm' => Some(&['n']),
        'n' => Some(&['b', 'm']),
        'o' => Some(&['i', 'p']),
        'p' => Some(&['o']),
        'q' => Some(&['w', 'a']),
        'r' => Some(&['e', 't']),
        's' => Some(&['a', 'd']),
        't' => Some(&['r', 'y']),
        'u' => Some(&['y', 'i']),
        'v' => Some(&['c', 'b']),
        'w' => Some(&['q', 'e']),
        'x' => Some(&['z', 'c']),
        'y' => Some(&['t', 'u']),
        'z' => Some(&['x']),
        _ => None,
    }
}
