/// Merges two sequences sorted by the same key order, combining elements
/// that compare equal. Used to sum two polynomials: elements are terms,
/// the key is the exponent, and combining adds coefficients.
///
/// `op` may return `None` to drop a combined element, which is how
/// cancelled terms vanish from the output.
pub fn sum<T>(
    mut a_iter: impl Iterator<Item = T>,
    mut b_iter: impl Iterator<Item = T>,
    cmp: impl Fn(&T, &T) -> std::cmp::Ordering,
    op: impl Fn(T, T) -> Option<T>,
) -> Vec<T> {
    let mut output = Vec::new();

    let mut a = a_iter.next();
    let mut b = b_iter.next();

    loop {
        match (a, b) {
            (Some(va), Some(vb)) => match cmp(&va, &vb) {
                std::cmp::Ordering::Equal => {
                    if let Some(r) = op(va, vb) {
                        output.push(r);
                    }
                    a = a_iter.next();
                    b = b_iter.next();
                }
                std::cmp::Ordering::Less => {
                    output.push(va);
                    a = a_iter.next();
                    b = Some(vb);
                }
                std::cmp::Ordering::Greater => {
                    output.push(vb);
                    a = Some(va);
                    b = b_iter.next();
                }
            },
            (None, Some(vb)) => {
                output.push(vb);
                output.extend(b_iter);
                break;
            }
            (Some(va), None) => {
                output.push(va);
                output.extend(a_iter);
                break;
            }
            (None, None) => {
                break;
            }
        }
    }

    output
}
