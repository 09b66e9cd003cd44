//! Sample programs pre-seeded for every supported language.

use std::collections::BTreeMap;

use crate::language;

const C_SAMPLE: &str = r#"#include <stdio.h>

int main() {
    char name[100];
    scanf("%s", name);
    printf("Hello %s\n", name);
    return 0;
}
"#;

const CPP_SAMPLE: &str = r#"#include <iostream>
using namespace std;

int main() {
    string name;
    cin >> name;
    cout << "Hello " << name << endl;
    return 0;
}
"#;

const CSHARP_SAMPLE: &str = r#"using System;

public class Program {
    public static void Main(string[] args) {
        var name = Console.ReadLine();
        Console.WriteLine("Hello " + name);
    }
}
"#;

const JAVA_SAMPLE: &str = r#"import java.util.Scanner;

public class Main {
    public static void main(String[] args) {
        Scanner sc = new Scanner(System.in);
        String name = sc.next();
        System.out.println("Hello " + name);
    }
}
"#;

const PYTHON_SAMPLE: &str = r#"name = raw_input()
print "Hello " + name
"#;

const PYTHON3_SAMPLE: &str = r#"name = input()
print("Hello " + name)
"#;

const JAVASCRIPT_SAMPLE: &str = r#"var name = input;
console.log("Hello " + name);
"#;

const NODE_SAMPLE: &str = r#"var input = require('fs').readFileSync(0, 'utf8');
console.log("Hello " + input.trim());
"#;

const RUBY_SAMPLE: &str = r#"name = gets.to_s.strip
puts "Hello " + name
"#;

/// Returns the sample program for a language display name.
pub fn sample_code(language: &str) -> Option<&'static str> {
    let sample = match language {
        "C" => C_SAMPLE,
        "C++" => CPP_SAMPLE,
        "C#" => CSHARP_SAMPLE,
        "Java" => JAVA_SAMPLE,
        "Python" => PYTHON_SAMPLE,
        "Python 3" => PYTHON3_SAMPLE,
        "JavaScript" => JAVASCRIPT_SAMPLE,
        "Node.js" => NODE_SAMPLE,
        "Ruby" => RUBY_SAMPLE,
        _ => return None,
    };
    Some(sample)
}

/// One entry per registry language, each holding its sample program.
pub fn seeded_code_map() -> BTreeMap<String, String> {
    language::all()
        .iter()
        .map(|spec| {
            (
                spec.name.to_string(),
                sample_code(spec.name).unwrap_or_default().to_string(),
            )
        })
        .collect()
}
