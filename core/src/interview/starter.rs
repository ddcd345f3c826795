//! Starter code placed in the editor when a question is opened or the language changes.

const PYTHON: &str = "def two_sum(nums, target):
    # Your code here
    pass";

const JAVASCRIPT: &str = "function twoSum(nums, target) {
    // Your code here
}";

const CPP: &str = "#include <vector>
using namespace std;

class Solution {
public:
    vector<int> twoSum(vector<int>& nums, int target) {
        // Your code here
    }
};";

/// Empty for languages without a template.
pub fn starter_code(language: &str) -> &'static str {
    match language {
        "python" => PYTHON,
        "javascript" => JAVASCRIPT,
        "cpp" => CPP,
        _ => "",
    }
}

/// File extension used for the solution file in the workspace.
/// Other languages use their own name if it is plain alphanumeric, else `txt`.
pub fn file_extension(language: &str) -> &str {
    match language {
        "python" => "py",
        "javascript" => "js",
        "cpp" => "cpp",
        other if !other.is_empty() && other.chars().all(|c| c.is_ascii_alphanumeric()) => other,
        _ => "txt",
    }
}
